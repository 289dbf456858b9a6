/// Height kept clear under the bars for the progress strip and its margin.
pub const RESERVED: f64 = 30.0;
pub const PROGRESS_HEIGHT: f64 = 20.0;
const BAR_STRETCH: f64 = 2.5;
const GAP: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Frequency bars for one analyser snapshot. Bars past the right edge are
/// dropped.
pub fn layout_bars(bins: &[u8], width: f64, height: f64) -> Vec<Bar> {
    if bins.is_empty() {
        return Vec::new();
    }
    let bar_width = width / bins.len() as f64 * BAR_STRETCH;
    let floor = (height - RESERVED).max(0.0);
    let mut x = 0.0;
    let mut bars = Vec::with_capacity(bins.len());
    for &bin in bins {
        if x >= width {
            break;
        }
        let h = f64::from(bin) / 255.0 * floor;
        bars.push(Bar {
            x,
            y: floor - h,
            width: bar_width,
            height: h,
        });
        x += bar_width + GAP;
    }
    bars
}

/// Width of the played portion of the progress strip, if the song has a
/// known duration.
pub fn progress_width(current: f64, duration: f64, width: f64) -> Option<f64> {
    (duration > 0.0).then(|| (current / duration).clamp(0.0, 1.0) * width)
}
