use gallery_wasm::easing::{self, Direction, Tween};
use gallery_wasm::sim::{
    self, Ball, Bounds, BouncingBalls, BouncingText, ForceNodes, GridStagger, Kaleidoscope,
    MatrixRain, Orbit, Orbiters, PathTrace, PiePulse, RandomBars, RandomRects, RetroNoise,
    RotatingSquare, ScatterLinks, Simulation, SineWave, Spiral, Starfield, TextScramble, FRAME,
};

const CELL: Bounds = Bounds {
    width: 300.0,
    height: 200.0,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn balls_stay_inside_bounds() {
    for seed in 0..20 {
        let mut rng = sim::rng(seed);
        let mut balls = BouncingBalls::new(CELL, &mut rng);
        assert_eq!(balls.balls().len(), BouncingBalls::COUNT);
        for tick in 0..2000 {
            // mix in some oversized steps, as after a stalled frame
            let dt = if tick % 97 == 0 { 0.1 } else { FRAME };
            balls.advance(dt);
            for b in balls.balls() {
                assert!((0.0..=CELL.width).contains(&b.x), "seed {seed} x = {}", b.x);
                assert!((0.0..=CELL.height).contains(&b.y), "seed {seed} y = {}", b.y);
            }
        }
    }
}

#[test]
fn ball_reflects_off_the_right_edge() {
    let ball = Ball {
        x: 299.0,
        y: 100.0,
        vx: 3.0,
        vy: 0.0,
        radius: 5.0,
        color: "red".into(),
    };
    let mut balls = BouncingBalls::with_balls(CELL, vec![ball]);
    balls.advance(FRAME);
    let b = &balls.balls()[0];
    assert!(close(b.x, 298.0));
    assert!(b.vx < 0.0);
}

#[test]
fn zero_sized_surface_keeps_balls_at_origin() {
    let mut rng = sim::rng(7);
    let bounds = Bounds::new(-10.0, 0.0);
    assert_eq!(bounds.width, 0.0);
    let mut balls = BouncingBalls::new(bounds, &mut rng);
    balls.advance(FRAME);
    assert!(balls.balls().iter().all(|b| b.x == 0.0 && b.y == 0.0));
}

#[test]
fn noise_is_black_and_white_only() {
    let mut noise = RetroNoise::new(16, 8, sim::rng(1));
    noise.advance(FRAME);
    assert_eq!(noise.pixels().len(), 128);
    let rgba = noise.rgba();
    assert_eq!(rgba.len(), 128 * 4);
    for px in rgba.chunks(4) {
        assert!(px == [0, 0, 0, 255] || px == [255, 255, 255, 255], "{px:?}");
    }
    assert!(noise.pixels().iter().any(|&p| p == 0xffff_ffff));
    assert!(noise.pixels().iter().any(|&p| p == 0xff00_0000));
}

#[test]
fn matrix_rain_has_one_cursor_per_column() {
    let mut rain = MatrixRain::new(300.0, sim::rng(3));
    assert_eq!(rain.columns(), 16);
    rain.advance(0.05);
    assert_eq!(rain.drops().len(), 16);
    for (i, &(x, y, glyph)) in rain.drops().iter().enumerate() {
        assert_eq!(x, i as f64 * MatrixRain::PITCH);
        assert_eq!(y, 0.0);
        assert!(glyph.is_ascii_graphic());
    }
    assert!(rain.cursors().iter().all(|&y| y == MatrixRain::PITCH));
}

#[test]
fn matrix_rain_columns_eventually_reset() {
    let mut rain = MatrixRain::new(100.0, sim::rng(5));
    let mut reset = false;
    for _ in 0..600 {
        rain.advance(0.05);
        reset |= rain.cursors().iter().any(|&y| y == 0.0);
        assert!(rain.cursors().iter().all(|&y| y <= 10_100.0 + MatrixRain::PITCH));
    }
    assert!(reset);
}

#[test]
fn text_scramble_uses_the_symbol_set() {
    let mut scramble = TextScramble::new(sim::rng(9));
    assert_eq!(scramble.text(), "");
    scramble.advance(0.1);
    assert_eq!(scramble.text().chars().count(), TextScramble::LEN);
    assert!(scramble.text().chars().all(|c| TextScramble::GLYPHS.contains(c)));
}

#[test]
fn sine_wave_spans_the_width_within_amplitude() {
    let mut wave = SineWave::new(CELL);
    for _ in 0..500 {
        wave.advance(FRAME);
    }
    let points: Vec<_> = wave.points().collect();
    assert_eq!(points.len(), 300);
    assert!(points
        .iter()
        .all(|&(_, y)| (y - 100.0).abs() <= SineWave::AMPLITUDE + 1e-9));
    assert!(wave.offset() < std::f64::consts::TAU);
}

#[test]
fn starfield_projects_inside_the_surface() {
    let mut stars = Starfield::new(CELL, sim::rng(11));
    for _ in 0..400 {
        stars.advance(FRAME);
        assert!(stars.stars().iter().all(|s| s.z > 0.0 && s.z <= CELL.width));
        for (x, y, size) in stars.projected() {
            assert!(CELL.contains(x, y));
            assert!(size >= 0.0);
        }
    }
}

#[test]
fn random_rects_are_bounded() {
    let mut rects = RandomRects::new(CELL, sim::rng(13));
    assert!(rects.latest().is_none());
    for _ in 0..100 {
        rects.advance(0.1);
        let r = rects.latest().unwrap();
        assert!(CELL.contains(r.x, r.y));
        assert!(r.w <= RandomRects::MAX_SIZE && r.h <= RandomRects::MAX_SIZE);
        assert!(r.color.starts_with("rgba(") && r.color.ends_with(",0.5)"));
    }
}

#[test]
fn kaleidoscope_arms_are_evenly_spread() {
    let mut k = Kaleidoscope::new();
    k.advance(FRAME);
    assert!(close(k.angle(), 0.05));
    let angles: Vec<f64> = k.arm_angles().collect();
    assert_eq!(angles.len(), Kaleidoscope::ARMS);
    for pair in angles.windows(2) {
        assert!(close(pair[1] - pair[0], std::f64::consts::PI / 3.0));
    }
    assert_ne!(k.line_color(), k.dot_color());
}

#[test]
fn spiral_restarts_past_its_end() {
    let mut spiral = Spiral::new(CELL);
    assert_eq!(spiral.position(), (150.0, 100.0));
    for _ in 0..495 {
        spiral.advance(FRAME);
    }
    assert!(spiral.t() > 49.0);
    for _ in 0..20 {
        spiral.advance(FRAME);
    }
    assert!(spiral.t() < 2.0);
}

#[test]
fn orbiters_pulse_between_five_and_fifteen() {
    let mut orbiters = Orbiters::new(CELL);
    for _ in 0..300 {
        orbiters.advance(FRAME);
        let circles = orbiters.circles();
        assert_eq!(circles.len(), Orbiters::COUNT);
        for (cx, cy, r) in circles {
            let d = ((cx - 150.0).powi(2) + (cy - 100.0).powi(2)).sqrt();
            assert!(close(d, Orbiters::RADIUS));
            assert!((5.0..=15.0).contains(&r));
        }
    }
}

#[test]
fn random_bars_tween_then_retarget() {
    let mut bars = RandomBars::new(CELL, sim::rng(17));
    let start = bars.values();
    assert_eq!(start.len(), RandomBars::COUNT);
    assert!(start.iter().all(|v| (0.0..100.0).contains(v)));

    // the tween finishes after 1 s and holds until the retarget at 1.5 s
    for _ in 0..66 {
        bars.advance(FRAME);
    }
    let settled = bars.values();
    for _ in 0..10 {
        bars.advance(FRAME);
    }
    assert_eq!(bars.values(), settled);

    for _ in 0..30 {
        bars.advance(FRAME);
    }
    assert_ne!(bars.values(), settled);

    for (x, y, w, h, fill) in bars.bars() {
        assert!(x >= 0.0 && x < CELL.width);
        assert!(close(y + h, CELL.height));
        assert!(w >= 0.0);
        assert!(fill == "orange" || fill == "purple");
    }
}

#[test]
fn force_nodes_cool_down_and_reheat() {
    let mut rng = sim::rng(19);
    let mut layout = ForceNodes::new(CELL, &mut rng);
    assert_eq!(layout.nodes().len(), ForceNodes::COUNT);
    assert_eq!(layout.alpha(), 1.0);

    for _ in 0..100 {
        layout.advance(FRAME);
    }
    let cooled = layout.alpha();
    assert!(cooled < 0.2);

    let (sx, sy) = layout
        .nodes()
        .iter()
        .fold((0.0, 0.0), |(x, y), n| (x + n.x, y + n.y));
    let n = layout.nodes().len() as f64;
    assert!((sx / n - 150.0).abs() < 1e-6);
    assert!((sy / n - 100.0).abs() < 1e-6);

    for _ in 0..30 {
        layout.advance(FRAME);
    }
    assert!(layout.alpha() > cooled);
}

#[test]
fn scatter_links_join_existing_points() {
    let mut scatter = ScatterLinks::new(CELL, sim::rng(23));
    let first = scatter.points().to_vec();
    assert_eq!(first.len(), ScatterLinks::POINTS);
    assert_eq!(scatter.links().count(), ScatterLinks::LINKS);
    for (a, b) in scatter.links() {
        assert!(first.contains(&a) && first.contains(&b));
    }
    scatter.advance(1.0);
    assert_ne!(scatter.points(), &first[..]);
}

#[test]
fn pie_slices_cover_the_full_turn() {
    let slices = PiePulse::layout(&[1.0, 1.0, 2.0]);
    assert_eq!(slices.len(), 3);
    assert_eq!(slices[0].start, 0.0);
    assert!(close(slices[2].end, std::f64::consts::TAU));
    assert!(close(slices[2].start, std::f64::consts::PI));
    assert!(PiePulse::layout(&[0.0, 0.0]).is_empty());

    let mut pie = PiePulse::new(sim::rng(29));
    for _ in 0..50 {
        pie.advance(0.5);
        assert_eq!(pie.slices().len(), PiePulse::COLORS.len());
        assert!((0.8..1.2).contains(&pie.scale()));
    }
}

#[test]
fn half_slice_path_uses_small_arc() {
    let slice = PiePulse::layout(&[1.0, 1.0])[0];
    assert_eq!(slice.path(50.0), "M0,0L0.000,-50.000A50,50,0,0,1,0.000,50.000Z");
}

#[test]
fn grid_wave_starts_at_the_centre() {
    let mut grid = GridStagger::new();
    assert_eq!(grid.cells(), 25);
    for _ in 0..12 {
        grid.advance(FRAME);
    }
    // 200 ms in: the centre cell is shrinking, the corners have not started
    assert!(grid.scale(12) < 1.0);
    assert_eq!(grid.scale(0), 1.0);
    assert_eq!(grid.scale(24), 1.0);
    for i in 0..25 {
        assert!((0.1..=1.0).contains(&grid.scale(i)));
    }
    assert!(GridStagger::cycle_ms() > 1700.0);
}

#[test]
fn rotating_square_alternates() {
    let mut square = RotatingSquare::new();
    assert_eq!(square.turns(), 0.0);
    assert_eq!(square.color(), "rgb(0, 255, 255)");
    // 1 s in: halfway through the forward half
    for _ in 0..60 {
        square.advance(FRAME);
    }
    assert!((square.turns() - 0.5).abs() < 1e-6);
    assert!((square.border_radius_pct() - 25.0).abs() < 1e-4);
    // 3 s in: halfway back
    for _ in 0..120 {
        square.advance(FRAME);
    }
    assert!((square.turns() - 0.5).abs() < 1e-6);
}

#[test]
fn path_trace_draws_in_and_out() {
    let mut trace = PathTrace::new(300.0);
    assert_eq!(trace.dash_offset(), 300.0);
    for _ in 0..45 {
        trace.advance(FRAME);
    }
    assert!((trace.dash_offset() - 150.0).abs() < 1e-6);
    for _ in 0..45 {
        trace.advance(FRAME);
    }
    assert!(trace.dash_offset() < 1.0);
}

#[test]
fn bouncing_letters_are_staggered() {
    let mut text = BouncingText::new();
    assert_eq!(text.letters().iter().collect::<String>(), "BOUNCE");
    for _ in 0..6 {
        text.advance(FRAME);
    }
    // 100 ms in: the first letter has lifted, the last has not started
    assert!(text.offset(0) < 0.0);
    assert_eq!(text.offset(5), 0.0);
}

#[test]
fn orbit_loops_every_second() {
    let mut orbit = Orbit::new();
    for _ in 0..30 {
        orbit.advance(FRAME);
    }
    assert!((orbit.translate_x() - 25.0).abs() < 1e-6);
    for _ in 0..31 {
        orbit.advance(FRAME);
    }
    assert!(orbit.turns() < 0.05);
}

#[test]
fn tweens_ease_and_wrap() {
    let loop_tween = Tween::new(1000.0, Direction::Loop, easing::linear);
    assert!(close(loop_tween.progress(250.0), 0.25));
    assert!(close(loop_tween.progress(1250.0), 0.25));

    let alt = Tween::new(1000.0, Direction::Alternate, easing::linear).with_delay(500.0);
    assert_eq!(alt.progress(100.0), 0.0);
    assert!(close(alt.progress(1250.0), 0.75));
    assert!(close(alt.progress(1750.0), 0.75));

    for f in [
        easing::linear,
        easing::ease_out_sine,
        easing::ease_in_out_sine,
        easing::ease_in_out_quad,
    ] {
        assert!(close(f(0.0), 0.0));
        assert!(close(f(1.0), 1.0));
    }
    assert!(close(easing::spring(0.0), 0.0));
    assert!((easing::spring(1.0) - 1.0).abs() < 0.05);
    assert_eq!(easing::grid_stagger_from_center(100.0, 5, 5, 12), 0.0);
    assert_eq!(easing::stagger(100.0, 3), 300.0);
}
