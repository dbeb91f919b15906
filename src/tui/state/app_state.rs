use tracing::{debug, info, warn};

use super::panels::{CpuPanel, DiskPanel, GpuPanel, MemPanel, NetPanel, OverviewPanel};
use super::tab_states::{MetricTab, NetTab, OverviewTab, TabController, TabView};
use super::TabKind;
use crate::collector::procfs::{
    BlockDeviceCollector, ConnectionCollector, DrmCardCollector, GpuCollector,
    InterfaceCollector, ProcessCollector, SourcePaths, SystemCollector,
};
use crate::collector::traits::FileSystem;
use crate::signal::SignalDispatcher;
use crate::tui::input::Command;
use crate::tui::navbar::{Highlight, NavBar};

/// Main application state.
pub struct AppState {
    nav: NavBar,
    tabs: Vec<TabController>,
    /// Suppresses re-sorting while set.
    pub sort_locked: bool,
    /// Status message shown in the footer until the next command.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(tabs: Vec<TabController>) -> Self {
        Self {
            nav: NavBar::new(tabs.len()),
            tabs,
            sort_locked: false,
            status_message: None,
        }
    }

    /// Builds the six standard tabs over one filesystem.
    pub fn with_fs<F>(fs: F, paths: &SourcePaths, page_size: u64, clk_tck: u64) -> Self
    where
        F: FileSystem + Clone + 'static,
    {
        let proc_path = &paths.proc_path;
        let sys_path = &paths.sys_path;
        let system = || SystemCollector::new(fs.clone(), paths.clone());
        let processes = || {
            ProcessCollector::new(fs.clone(), proc_path.clone())
                .with_page_size(page_size)
                .with_clk_tck(clk_tck)
        };

        let tabs = vec![
            TabController::Overview(OverviewTab::new(Box::new(OverviewPanel::new(system())))),
            TabController::Cpu(MetricTab::new(
                Box::new(processes()),
                Box::new(CpuPanel::new(system())),
            )),
            TabController::Gpu(MetricTab::new(
                Box::new(GpuCollector::new(fs.clone(), proc_path.clone()).with_clk_tck(clk_tck)),
                Box::new(GpuPanel::new(Box::new(DrmCardCollector::new(
                    fs.clone(),
                    sys_path.clone(),
                )))),
            )),
            TabController::Mem(MetricTab::new(
                Box::new(processes()),
                Box::new(MemPanel::new(system())),
            )),
            TabController::Disk(MetricTab::new(
                Box::new(processes()),
                Box::new(DiskPanel::new(Box::new(BlockDeviceCollector::new(
                    fs.clone(),
                    sys_path.clone(),
                )))),
            )),
            TabController::Net(NetTab::new(
                Box::new(ConnectionCollector::new(fs.clone(), proc_path.clone())),
                Box::new(NetPanel::new(Box::new(InterfaceCollector::new(
                    fs.clone(),
                    proc_path.clone(),
                    sys_path.clone(),
                )))),
            )),
        ];
        Self::new(tabs)
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    /// Kinds of all tabs, in navigation order.
    pub fn tab_kinds(&self) -> Vec<TabKind> {
        self.tabs.iter().map(TabController::kind).collect()
    }

    pub fn active(&self) -> Option<&TabController> {
        self.tabs.get(self.nav.selected())
    }

    pub fn active_view(&self) -> Option<&dyn TabView> {
        self.active().map(TabController::view)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut dyn TabView> {
        self.tabs
            .get_mut(self.nav.selected())
            .map(TabController::view_mut)
    }

    /// Runs one tick of the selected tab. Other tabs are left untouched.
    pub fn refresh_active(&mut self) {
        let lock = self.sort_locked;
        if let Some(tab) = self.active_view_mut() {
            tab.refresh(lock);
        }
    }

    /// Sets the table capacity of the selected tab.
    pub fn resize_active(&mut self, visible_rows: usize) {
        if let Some(tab) = self.active_view_mut() {
            tab.resize(visible_rows);
        }
    }

    /// Applies one command. Returns the highlight change for tab moves.
    ///
    /// `Quit` is not handled here; the caller owns the quit flag.
    pub fn apply(
        &mut self,
        command: Command,
        signals: &mut dyn SignalDispatcher,
    ) -> Option<Highlight> {
        self.status_message = None;
        match command {
            Command::NextTab => return Some(self.navigate(NavBar::move_right)),
            Command::PrevTab => return Some(self.navigate(NavBar::move_left)),
            Command::CursorUp => {
                if let Some(tab) = self.active_view_mut() {
                    tab.move_up();
                }
            }
            Command::CursorDown => {
                if let Some(tab) = self.active_view_mut() {
                    tab.move_down();
                }
            }
            Command::ToggleLock => {
                self.sort_locked = !self.sort_locked;
                debug!(locked = self.sort_locked, "sort lock toggled");
            }
            Command::Signal(kind) => {
                let Some(pid) = self.active_view().and_then(|t| t.selected_pid()) else {
                    self.status_message = Some("No process selected".to_string());
                    return None;
                };
                match signals.send(pid, kind) {
                    Ok(()) => {
                        info!(pid, signal = kind.name(), "signal sent");
                        self.status_message = Some(format!("Sent {} to {}", kind.name(), pid));
                    }
                    Err(e) => {
                        warn!(pid, signal = kind.name(), error = %e, "signal failed");
                        self.status_message = Some(e.to_string());
                    }
                }
            }
            Command::Quit => {}
        }
        None
    }

    fn navigate(&mut self, step: fn(&mut NavBar) -> Highlight) -> Highlight {
        let highlight = step(&mut self.nav);
        if highlight.changed() {
            debug!(
                from = highlight.deselected,
                to = highlight.selected,
                "tab changed"
            );
        }
        highlight
    }
}
