//! Application state management.

mod app_state;
mod panels;
mod tab_states;

pub use app_state::*;
pub use panels::*;
pub use tab_states::*;

/// Available tabs in the TUI, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabKind {
    #[default]
    Overview,
    Cpu,
    Gpu,
    Mem,
    Disk,
    Net,
}

impl TabKind {
    pub fn all() -> &'static [TabKind] {
        &[
            TabKind::Overview,
            TabKind::Cpu,
            TabKind::Gpu,
            TabKind::Mem,
            TabKind::Disk,
            TabKind::Net,
        ]
    }

    /// Returns the display name of the tab.
    pub fn name(&self) -> &'static str {
        match self {
            TabKind::Overview => "Overview",
            TabKind::Cpu => "CPU",
            TabKind::Gpu => "GPU",
            TabKind::Mem => "MEM",
            TabKind::Disk => "DISK",
            TabKind::Net => "NET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order_and_names() {
        let names: Vec<&str> = TabKind::all().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Overview", "CPU", "GPU", "MEM", "DISK", "NET"]);
        assert_eq!(TabKind::default(), TabKind::Overview);
    }
}
