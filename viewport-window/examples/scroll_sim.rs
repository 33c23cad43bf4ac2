// Example: drive a window over a 100k-row grid with a printing surface.
use viewport_window::{Align, ColumnId, RenderSurface, RowModel, WindowManager, WindowOptions};

struct Sheet {
    rows: usize,
    columns: Vec<ColumnId>,
}

impl RowModel for Sheet {
    type Row = usize;
    type Value = u64;

    fn row_count(&self) -> usize {
        self.rows
    }

    fn row_at(&self, index: usize) -> usize {
        index
    }

    fn value_at(&self, index: usize, column: &ColumnId) -> u64 {
        index as u64 * 10 + column.len() as u64
    }

    fn columns(&self) -> &[ColumnId] {
        &self.columns
    }
}

/// Counts live nodes instead of touching a real DOM.
#[derive(Default)]
struct CountingSurface {
    live_rows: usize,
    live_cells: usize,
    extent: u64,
}

impl RenderSurface for CountingSurface {
    type Row = usize;
    type Value = u64;
    type RowHandle = usize;
    type CellHandle = u64;
    type Error = std::convert::Infallible;

    fn create_row(&mut self, index: usize, _data: usize) -> Result<usize, Self::Error> {
        self.live_rows += 1;
        Ok(index)
    }

    fn create_cell(
        &mut self,
        _row: &mut usize,
        _column: &ColumnId,
        value: u64,
    ) -> Result<u64, Self::Error> {
        self.live_cells += 1;
        Ok(value)
    }

    fn destroy_cell(&mut self, _cell: u64) -> Result<(), Self::Error> {
        self.live_cells -= 1;
        Ok(())
    }

    fn destroy_row(&mut self, _row: usize) -> Result<(), Self::Error> {
        self.live_rows -= 1;
        Ok(())
    }

    fn update_cell_value(&mut self, cell: &mut u64, value: u64) -> Result<(), Self::Error> {
        *cell = value;
        Ok(())
    }

    fn set_content_extent(&mut self, total_height: u64) {
        self.extent = total_height;
    }

    fn scroll_to(&mut self, offset: u64) {
        println!("surface scrolled to {offset}");
    }
}

fn main() {
    let sheet = Sheet {
        rows: 100_000,
        columns: ["id", "name", "price", "qty"].into_iter().map(ColumnId::from).collect(),
    };
    let options = WindowOptions::default().with_enabled(true);
    let mut window = WindowManager::new(options, CountingSurface::default());

    let report = window
        .apply_viewport(&sheet, 0, 600)
        .expect("window is alive");
    println!(
        "mounted: range={:?} created={} extent={}",
        report.range,
        report.created.len(),
        window.surface().extent
    );

    for offset in [400, 800, 1_200, 250_000] {
        let report = window.on_scroll(&sheet, offset).expect("window is alive");
        println!(
            "scroll {offset}: range={:?} +{} -{} live_rows={} live_cells={}",
            report.range,
            report.created.len(),
            report.destroyed.len(),
            window.surface().live_rows,
            window.surface().live_cells
        );
    }

    window
        .scroll_to_row(&sheet, 99_999, Align::End)
        .expect("window is alive");
    println!("after scroll_to_row: state={:?}", window.state());

    let released = window.teardown();
    println!(
        "teardown released {released} rows, live_rows={}",
        window.surface().live_rows
    );
}
