use std::cell::RefCell;

use gallery_wasm::gallery::{
    build_layout, dispatch, error_text, Descriptor, GridPlan, LayoutSink, Registry, Strategy,
    Surface,
};

/// Records layout calls as a tree of rows -> (title, container text).
#[derive(Default)]
struct RecordingSink {
    rows: Vec<Vec<(String, usize)>>,
    next_container: usize,
}

impl LayoutSink for RecordingSink {
    type Row = usize;
    type Container = usize;
    type Error = String;

    fn append_row(&mut self) -> Result<usize, String> {
        self.rows.push(Vec::new());
        Ok(self.rows.len() - 1)
    }

    fn append_cell(&mut self, row: &usize, title: &str) -> Result<usize, String> {
        let id = self.next_container;
        self.next_container += 1;
        self.rows[*row].push((title.to_string(), id));
        Ok(id)
    }
}

fn named(n: usize) -> Registry<usize> {
    Registry::new((0..n).map(|i| Descriptor::new(format!("item {i}"), i)).collect())
}

#[test]
fn grid_plan_rounds_up() {
    for n in 0..=10 {
        let plan = GridPlan::for_count(n);
        assert_eq!(plan.row_count(), (n + 2) / 3, "n = {n}");
        assert_eq!(plan.cell_count(), n);
        assert!(plan.rows().iter().all(|r| !r.is_empty() && r.len() <= 3));
    }
}

#[test]
fn standard_registry_lays_out_seven_rows() {
    let registry = Registry::<Strategy>::standard();
    assert_eq!(registry.len(), 20);

    let mut sink = RecordingSink::default();
    let containers = build_layout(&registry, &mut sink).unwrap();

    assert_eq!(sink.rows.len(), 7);
    assert!(sink.rows[..6].iter().all(|r| r.len() == 3));
    assert_eq!(sink.rows[6].len(), 2);
    assert_eq!(containers, (0..20).collect::<Vec<_>>());
    assert_eq!(sink.rows[0][0].0, "1. Retro Noise");
    assert_eq!(sink.rows[5][1].0, "17. Rotating Squares");
    assert_eq!(sink.rows[6][1].0, "20. Orbit");
}

#[test]
fn empty_registry_has_no_rows_and_renders_nothing() {
    let registry = named(0);
    let mut sink = RecordingSink::default();
    let containers = build_layout(&registry, &mut sink).unwrap();
    assert!(sink.rows.is_empty());
    assert!(containers.is_empty());

    let mut calls = 0;
    let out = dispatch(
        &registry,
        &containers,
        |_, _| -> Result<(), String> {
            calls += 1;
            Ok(())
        },
        |_, _| {},
    );
    assert_eq!(calls, 0);
    assert!(out.running.is_empty() && out.failed.is_empty());
}

#[test]
fn layout_error_stops_the_build() {
    struct Failing;
    impl LayoutSink for Failing {
        type Row = ();
        type Container = ();
        type Error = &'static str;
        fn append_row(&mut self) -> Result<(), &'static str> {
            Err("no table")
        }
        fn append_cell(&mut self, _: &(), _: &str) -> Result<(), &'static str> {
            Ok(())
        }
    }
    assert_eq!(build_layout(&named(4), &mut Failing), Err("no table"));
}

#[test]
fn failing_entry_point_only_marks_its_own_cell() {
    let registry = named(5);
    let cells: Vec<RefCell<String>> = (0..5).map(|_| RefCell::new(String::new())).collect();
    let containers: Vec<&RefCell<String>> = cells.iter().collect();

    let out = dispatch(
        &registry,
        &containers,
        |&i, cell| {
            if i == 2 {
                return Err("boom");
            }
            cell.borrow_mut().push_str("drawn");
            Ok(i * 10)
        },
        |cell, message| *cell.borrow_mut() = message.to_string(),
    );

    assert_eq!(*cells[2].borrow(), "Error: boom");
    for i in [0, 1, 3, 4] {
        assert_eq!(*cells[i].borrow(), "drawn");
    }
    assert_eq!(out.failed, vec![2]);
    assert_eq!(
        out.running,
        vec![(0, 0), (1, 10), (3, 30), (4, 40)]
    );
}

#[test]
fn every_entry_point_is_invoked_once_in_order() {
    let registry = named(7);
    let containers: Vec<usize> = (0..7).collect();
    let mut seen = Vec::new();
    dispatch(
        &registry,
        &containers,
        |&i, &c| -> Result<(), String> {
            seen.push((i, c));
            Ok(())
        },
        |_, _| panic!("nothing fails"),
    );
    assert_eq!(seen, (0..7).map(|i| (i, i)).collect::<Vec<_>>());
}

#[test]
fn error_text_prefixes_message() {
    assert_eq!(error_text("boom"), "Error: boom");
    assert_eq!(error_text(42), "Error: 42");
}

#[test]
fn duplicate_names_are_kept() {
    let registry = Registry::new(vec![Descriptor::new("same", 1), Descriptor::new("same", 2)]);
    let mut sink = RecordingSink::default();
    build_layout(&registry, &mut sink).unwrap();
    assert_eq!(sink.rows[0].len(), 2);
    assert!(sink.rows[0].iter().all(|(t, _)| t == "same"));
}

#[test]
fn surfaces_split_eight_six_six() {
    let count = |surface: Surface| Strategy::ALL.iter().filter(|s| s.surface() == surface).count();
    assert_eq!(count(Surface::Canvas), 8);
    assert_eq!(count(Surface::Svg), 6);
    assert_eq!(count(Surface::Dom), 6);
}
