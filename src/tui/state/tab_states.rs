//! Per-kind tab controllers.
//!
//! Every tab runs the same tick: list entities, reconcile against the tracked
//! set, sample counters, sort unless locked, clip the cursor. The kinds
//! differ in row type, comparator and when they resort, so each kind is one
//! variant of [`TabController`].

use tracing::{debug, trace};

use super::TabKind;
use super::panels::{InfoLine, InfoPanel};
use crate::collector::procfs::Connection;
use crate::provider::{CounterProvider, EntityProvider, MetricSource};
use crate::reconcile::reconcile;
use crate::tui::models::{CpuRow, DiskRow, GpuRow, MemRow, MetricRow, NetRow};
use crate::tui::table::{Cursor, RenderSink, TabTable, TableRow};

/// Operations the UI needs from any tab.
pub trait TabView {
    fn refresh(&mut self, lock: bool);
    fn move_up(&mut self);
    fn move_down(&mut self);
    fn resize(&mut self, visible_rows: usize);
    fn cursor(&self) -> Cursor;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Pid of the highlighted row, the target of signal commands.
    fn selected_pid(&self) -> Option<u32>;
    fn headers(&self) -> &'static [&'static str];
    fn emit(&self, sink: &mut dyn RenderSink);
    fn info_lines(&self) -> Vec<InfoLine>;
}

// ---------------------------------------------------------------------------
// Process tabs
// ---------------------------------------------------------------------------

/// A pid-keyed tab fed by a listing plus per-entity counters.
pub struct MetricTab<R: MetricRow> {
    pub table: TabTable<u32, R>,
    source: Box<dyn MetricSource<u32, R::Raw, R::Counters>>,
    panel: Box<dyn InfoPanel>,
}

impl<R: MetricRow> MetricTab<R> {
    pub fn new(
        source: Box<dyn MetricSource<u32, R::Raw, R::Counters>>,
        panel: Box<dyn InfoPanel>,
    ) -> Self {
        Self {
            table: TabTable::new(),
            source,
            panel,
        }
    }
}

impl<R: MetricRow> TabView for MetricTab<R> {
    fn refresh(&mut self, lock: bool) {
        self.panel.refresh();

        match self.source.list() {
            Ok(current) => {
                let stats = reconcile(
                    &mut self.table.entities,
                    current,
                    |&pid, raw| R::create(pid, raw),
                    |row, raw| row.refresh_identity(raw),
                );
                if stats.changed() {
                    trace!(
                        arrived = stats.arrived,
                        departed = stats.departed,
                        "entity set changed"
                    );
                }
                for entity in &mut self.table.entities {
                    match self.source.sample(&entity.id) {
                        Ok((counters, timestamp)) => entity.payload.record(counters, timestamp),
                        Err(e) => {
                            debug!(pid = entity.id, error = %e, "sample failed, keeping last values")
                        }
                    }
                }
            }
            Err(e) => debug!(error = %e, "listing failed, keeping previous entities"),
        }

        if !lock {
            self.table.sort_by(R::compare);
        }
        self.table.clip();
    }

    fn move_up(&mut self) {
        self.table.move_up();
    }

    fn move_down(&mut self) {
        self.table.move_down();
    }

    fn resize(&mut self, visible_rows: usize) {
        self.table.resize(visible_rows);
    }

    fn cursor(&self) -> Cursor {
        self.table.cursor()
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn selected_pid(&self) -> Option<u32> {
        self.table.selected().map(|e| e.id)
    }

    fn headers(&self) -> &'static [&'static str] {
        R::headers()
    }

    fn emit(&self, sink: &mut dyn RenderSink) {
        self.table.emit(sink);
    }

    fn info_lines(&self) -> Vec<InfoLine> {
        self.panel.lines()
    }
}

// ---------------------------------------------------------------------------
// NET
// ---------------------------------------------------------------------------

/// Connections keyed by socket inode.
///
/// Resorts by priority only on ticks where the number of tracked
/// connections differs from the last sort, so rows stay put while the set
/// is stable. A change seen while locked is applied on the first unlocked
/// tick.
pub struct NetTab {
    pub table: TabTable<u64, NetRow>,
    source: Box<dyn EntityProvider<u64, Connection>>,
    panel: Box<dyn InfoPanel>,
    /// Entity count at the last sort.
    last_count: Option<usize>,
}

impl NetTab {
    pub fn new(source: Box<dyn EntityProvider<u64, Connection>>, panel: Box<dyn InfoPanel>) -> Self {
        Self {
            table: TabTable::new(),
            source,
            panel,
            last_count: None,
        }
    }
}

impl TabView for NetTab {
    fn refresh(&mut self, lock: bool) {
        self.panel.refresh();

        match self.source.list() {
            Ok(current) => {
                reconcile(
                    &mut self.table.entities,
                    current,
                    |_, conn| NetRow::new(conn),
                    |row, conn| row.conn = conn,
                );
            }
            Err(e) => debug!(error = %e, "connection listing failed, keeping previous set"),
        }

        let count = self.table.len();
        if self.last_count != Some(count) && !lock {
            self.table.sort_by(NetRow::compare);
            self.last_count = Some(count);
        }
        self.table.clip();
    }

    fn move_up(&mut self) {
        self.table.move_up();
    }

    fn move_down(&mut self) {
        self.table.move_down();
    }

    fn resize(&mut self, visible_rows: usize) {
        self.table.resize(visible_rows);
    }

    fn cursor(&self) -> Cursor {
        self.table.cursor()
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn selected_pid(&self) -> Option<u32> {
        self.table.selected().map(|e| e.payload.conn.pid)
    }

    fn headers(&self) -> &'static [&'static str] {
        NetRow::headers()
    }

    fn emit(&self, sink: &mut dyn RenderSink) {
        self.table.emit(sink);
    }

    fn info_lines(&self) -> Vec<InfoLine> {
        self.panel.lines()
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Info panel only; the table is always empty.
pub struct OverviewTab {
    panel: Box<dyn InfoPanel>,
}

impl OverviewTab {
    pub fn new(panel: Box<dyn InfoPanel>) -> Self {
        Self { panel }
    }
}

impl TabView for OverviewTab {
    fn refresh(&mut self, _lock: bool) {
        self.panel.refresh();
    }

    fn move_up(&mut self) {}

    fn move_down(&mut self) {}

    fn resize(&mut self, _visible_rows: usize) {}

    fn cursor(&self) -> Cursor {
        Cursor::default()
    }

    fn len(&self) -> usize {
        0
    }

    fn selected_pid(&self) -> Option<u32> {
        None
    }

    fn headers(&self) -> &'static [&'static str] {
        &[]
    }

    fn emit(&self, _sink: &mut dyn RenderSink) {}

    fn info_lines(&self) -> Vec<InfoLine> {
        self.panel.lines()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// One tab with its kind-specific state.
pub enum TabController {
    Overview(OverviewTab),
    Cpu(MetricTab<CpuRow>),
    Gpu(MetricTab<GpuRow>),
    Mem(MetricTab<MemRow>),
    Disk(MetricTab<DiskRow>),
    Net(NetTab),
}

impl TabController {
    pub fn kind(&self) -> TabKind {
        match self {
            TabController::Overview(_) => TabKind::Overview,
            TabController::Cpu(_) => TabKind::Cpu,
            TabController::Gpu(_) => TabKind::Gpu,
            TabController::Mem(_) => TabKind::Mem,
            TabController::Disk(_) => TabKind::Disk,
            TabController::Net(_) => TabKind::Net,
        }
    }

    pub fn view(&self) -> &dyn TabView {
        match self {
            TabController::Overview(tab) => tab,
            TabController::Cpu(tab) => tab,
            TabController::Gpu(tab) => tab,
            TabController::Mem(tab) => tab,
            TabController::Disk(tab) => tab,
            TabController::Net(tab) => tab,
        }
    }

    pub fn view_mut(&mut self) -> &mut dyn TabView {
        match self {
            TabController::Overview(tab) => tab,
            TabController::Cpu(tab) => tab,
            TabController::Gpu(tab) => tab,
            TabController::Mem(tab) => tab,
            TabController::Disk(tab) => tab,
            TabController::Net(tab) => tab,
        }
    }
}
