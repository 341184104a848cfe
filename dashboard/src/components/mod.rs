//! Dashboard UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! One component per visual surface. Each reads its own slice of
//! `DashboardState`, so a surface only redraws when its model changes.

pub mod bar_chart;
pub mod chart_frame;
pub mod line_chart;
pub mod status_panel;
