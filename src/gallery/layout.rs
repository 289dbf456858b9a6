use super::registry::Registry;

/// Cells per table row.
pub const COLUMNS: usize = 3;

/// Row-major grouping of `count` cells into rows of at most [`COLUMNS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPlan {
    rows: Vec<Vec<usize>>,
}

impl GridPlan {
    pub fn for_count(count: usize) -> Self {
        let rows = (0..count)
            .collect::<Vec<_>>()
            .chunks(COLUMNS)
            .map(<[usize]>::to_vec)
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Target the layout builder writes into. The browser implementation appends
/// table rows and cells; tests record the calls.
pub trait LayoutSink {
    type Row;
    type Container;
    type Error;

    fn append_row(&mut self) -> Result<Self::Row, Self::Error>;

    /// Append a cell holding a title node and an empty container node, and
    /// return the container.
    fn append_cell(&mut self, row: &Self::Row, title: &str)
        -> Result<Self::Container, Self::Error>;
}

/// Allocate one container per descriptor, in registry order.
pub fn build_layout<R, S: LayoutSink>(
    registry: &Registry<R>,
    sink: &mut S,
) -> Result<Vec<S::Container>, S::Error> {
    let plan = GridPlan::for_count(registry.len());
    let mut containers = Vec::with_capacity(plan.cell_count());
    for row in plan.rows() {
        let handle = sink.append_row()?;
        for &index in row {
            let Some(descriptor) = registry.get(index) else {
                continue;
            };
            containers.push(sink.append_cell(&handle, &descriptor.name)?);
        }
    }
    log::debug!(
        "layout: {} rows, {} cells",
        plan.row_count(),
        containers.len()
    );
    Ok(containers)
}
