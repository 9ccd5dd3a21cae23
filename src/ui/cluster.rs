//! Cluster observability dashboard.

use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Row, Table},
};

use super::helpers::{error_line, hint_line, panel, spinner};
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS, COLOR_WARNING};
use crate::app::App;
use crate::models::{format_uptime, ClusterHealth, ClusterSlots};

pub fn render_cluster(frame: &mut Frame, app: &App, area: Rect) {
    let cluster = &app.ctx.cluster;
    let [summary_area, gauge_area, error_area, body] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(cluster.error().is_some() as u16),
        Constraint::Min(4),
    ])
    .areas(area);

    render_summary(frame, app, summary_area);
    if let Some(notice) = cluster.error() {
        frame.render_widget(Paragraph::new(error_line(notice, true)), error_area);
    }

    let Some(health) = cluster.health() else {
        let text = if cluster.is_loading() {
            "Loading cluster state…"
        } else {
            "No cluster data."
        };
        frame.render_widget(Paragraph::new(hint_line(text)).block(panel("Nodes")), body);
        return;
    };

    let coverage = health.slot_coverage();
    let gauge = Gauge::default()
        .block(panel("Slot coverage"))
        .gauge_style(Style::default().fg(if coverage >= 100.0 {
            COLOR_SUCCESS
        } else {
            COLOR_WARNING
        }))
        .ratio((coverage / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{:.1}% ({} / {} slots)",
            coverage, health.cluster_slots_assigned, crate::models::TOTAL_SLOTS
        ));
    frame.render_widget(gauge, gauge_area);

    let [nodes_area, slots_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    render_nodes(frame, health, nodes_area);
    if let Some(slots) = cluster.slots() {
        render_slots(frame, slots, slots_area);
    }
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let cluster = &app.ctx.cluster;
    let mut lines = Vec::new();

    let mut first = Vec::new();
    if let Some(health) = cluster.health() {
        let (state, color) = if health.is_ok() {
            ("ok", COLOR_SUCCESS)
        } else {
            (health.cluster_state.as_str(), COLOR_ERROR)
        };
        first.push(Span::raw("State: "));
        first.push(Span::styled(state.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)));
        first.push(Span::raw(format!(
            "   size {}   known nodes {}   pfail {}   fail {}",
            health.cluster_size,
            health.cluster_known_nodes,
            health.cluster_slots_pfail,
            health.cluster_slots_fail
        )));
    }
    if cluster.is_loading() {
        first.push(Span::raw(format!("  {}", spinner(app.tick_count))));
    }
    lines.push(Line::from(first));

    let mut second = Vec::new();
    if let Some(mode) = cluster.mode() {
        second.push(Span::styled(
            format!("Mode: {}", mode.mode),
            Style::default().fg(if mode.is_mock() { COLOR_WARNING } else { COLOR_ACCENT }),
        ));
        if let Some(description) = &mode.description {
            second.push(Span::styled(format!("  {}", description), Style::default().fg(COLOR_DIM)));
        }
    }
    lines.push(Line::from(second));

    let refresh = if cluster.auto_refresh() { "on" } else { "off" };
    let updated = cluster
        .last_updated()
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    lines.push(hint_line(&format!(
        "Updated {}   auto-refresh {}   [a] toggle  [r] refresh",
        updated, refresh
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_nodes(frame: &mut Frame, health: &ClusterHealth, area: Rect) {
    let mut rows = Vec::new();
    for master in health.masters() {
        rows.push(node_row(master, false));
        for replica in health.replicas_of(&master.node_id) {
            rows.push(node_row(replica, true));
        }
    }
    // Replicas whose master is not listed.
    for orphan in health.nodes.iter().filter(|n| {
        !n.is_master()
            && !n
                .master_id
                .as_deref()
                .is_some_and(|m| health.nodes.iter().any(|o| o.node_id == m))
    }) {
        rows.push(node_row(orphan, true));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(vec!["Node", "Slots", "Memory", "Ops/s", "Clients", "Uptime"])
            .style(Style::default().fg(COLOR_DIM)),
    )
    .block(panel("Nodes"));
    frame.render_widget(table, area);
}

fn node_row(node: &crate::models::ClusterNode, replica: bool) -> Row<'static> {
    let name = if replica {
        format!("  └ {}", node.ip_port)
    } else {
        node.ip_port.clone()
    };
    let color = if node.is_failing() {
        COLOR_ERROR
    } else if replica {
        COLOR_DIM
    } else {
        COLOR_SUCCESS
    };
    let dash = || "-".to_string();
    Row::new(vec![
        name,
        if replica { dash() } else { node.slot_count().to_string() },
        node.used_memory_human.clone().unwrap_or_else(dash),
        node.instantaneous_ops_per_sec.map(|v| v.to_string()).unwrap_or_else(dash),
        node.connected_clients.map(|v| v.to_string()).unwrap_or_else(dash),
        node.uptime_in_seconds.map(format_uptime).unwrap_or_else(dash),
    ])
    .style(Style::default().fg(color))
}

fn render_slots(frame: &mut Frame, slots: &ClusterSlots, area: Rect) {
    let rows: Vec<Row> = slots
        .slot_distributions
        .iter()
        .map(|d| {
            Row::new(vec![
                d.slot_range.clone(),
                d.slot_count().to_string(),
                d.master_ip_port.clone(),
                d.replicas.len().to_string(),
            ])
        })
        .collect();
    let title = format!("Slots of {}", slots.total_slots);
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(4),
        ],
    )
    .header(
        Row::new(vec!["Range", "Slots", "Master", "Rep"]).style(Style::default().fg(COLOR_DIM)),
    )
    .block(panel(&title));
    frame.render_widget(table, area);
}
