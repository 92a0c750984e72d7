//! 터미널 텍스트 렌더링.

use std::fmt::Write;

use iotbm_core::models::schedule::weekday_name;
use iotbm_core::ports::notifier::Notification;
use iotbm_dashboard::format::{format_date, format_time_ago};
use iotbm_dashboard::view_state::ViewPhase;
use iotbm_dashboard::views::backup_details::{self, BackupDetailsView};
use iotbm_dashboard::views::backup_history::{BackupHistoryView, BackupRow};
use iotbm_dashboard::views::device_details::{self, DeviceDetailsView};
use iotbm_dashboard::views::device_list::{DeviceCard, DeviceListView};
use iotbm_dashboard::views::log_viewer::LogViewerView;
use iotbm_dashboard::views::schedule_editor::ScheduleEditorView;
use iotbm_dashboard::views::status_bar::StatusBarState;
use iotbm_dashboard::Dashboard;

const LOADING: &str = "  (loading...)";

fn phase_note<T>(phase: &ViewPhase<T>) -> Option<String> {
    match phase {
        ViewPhase::Loading => Some(LOADING.to_string()),
        ViewPhase::Error(message) => Some(format!("  ! {message}")),
        _ => None,
    }
}

pub fn render_status(state: &StatusBarState) -> String {
    if state.loading {
        return format!("[Server]{LOADING}");
    }
    if let Some(message) = state.message() {
        return format!("[Server] {message}");
    }
    match state.view() {
        Some(view) => format!(
            "[Server] {} v{} | Uptime {} | Storage {} ({}) | CPU/Mem {} | Devices {}",
            view.status_text,
            view.version,
            view.uptime_text,
            view.storage_percent_text,
            view.storage_text,
            view.cpu_memory_text,
            view.devices_text
        ),
        None => String::from("[Server]"),
    }
}

fn device_line(card: &DeviceCard) -> String {
    format!(
        "  {:<20} {:<28} {:<8} last backup {:<16} storage {} ({})",
        card.name,
        card.subtitle,
        card.status_text,
        card.last_backup_text,
        card.storage_percent_text,
        card.storage_text
    )
}

pub fn render_devices(view: &DeviceListView) -> String {
    let mut out = String::from("== Devices ==\n");
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    if let Some(message) = view.empty_message() {
        let _ = write!(out, "  No devices found. {message}");
        return out;
    }
    let lines: Vec<_> = view.cards().iter().map(device_line).collect();
    out.push_str(&lines.join("\n"));
    out
}

fn backup_line(row: &BackupRow) -> String {
    format!(
        "  #{:<16} {:<20} {:<12} {:<16} {:>10} {:<10} {}",
        row.id,
        row.device_name,
        row.status_label,
        row.time_text,
        row.size_text,
        row.type_label,
        row.location_label
    )
}

pub fn render_backups(view: &BackupHistoryView) -> String {
    let mut out = format!("== Backup History ({}) ==\n", view.filter());
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    if let Some(message) = view.empty_message() {
        let _ = write!(out, "  No backups found. {message}");
        return out;
    }
    let lines: Vec<_> = view.rows().iter().map(backup_line).collect();
    out.push_str(&lines.join("\n"));
    out
}

pub fn render_logs(view: &LogViewerView) -> String {
    let mut out = String::from("== Logs ==\n");
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    if let Some(message) = view.empty_message() {
        let _ = write!(out, "  {message}");
        return out;
    }
    let lines: Vec<_> = view
        .lines()
        .iter()
        .map(|l| format!("  {} {:<7} {}", l.time_text, l.level_label, l.message))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    [
        render_status(&dashboard.status()),
        render_devices(&dashboard.devices),
        render_backups(&dashboard.backups),
        render_logs(&dashboard.logs),
    ]
    .join("\n\n")
}

pub fn render_device(view: &DeviceDetailsView) -> String {
    let mut out = format!("== Device {} ==\n", view.device_id());
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    match (view.card(), view.phase().data()) {
        (Some(card), Some(device)) => {
            out.push_str(&device_line(&card));
            let _ = write!(
                out,
                "\n  os {} | last seen {}",
                device.os_version,
                format_time_ago(device.last_seen)
            );
            if !view.can_start_backup() {
                out.push_str("\n  (backup unavailable while offline)");
            }
        }
        _ => {
            let _ = write!(out, "  Device Not Found. {}", device_details::NOT_FOUND_MESSAGE);
        }
    }
    out
}

pub fn render_schedule(view: &ScheduleEditorView) -> String {
    let mut out = String::from("== Backup Schedule ==\n");
    if let Some(message) = view.message() {
        let _ = write!(out, "  {message}");
        return out;
    }
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    let Some(schedule) = view.schedule() else {
        return out;
    };

    let fields = view.visible_fields();
    let mut when = schedule.frequency.label().to_string();
    if fields.time {
        let _ = write!(when, " at {}", schedule.time.as_deref().unwrap_or("--:--"));
    }
    if fields.day_of_week {
        let day = schedule
            .day_of_week
            .and_then(weekday_name)
            .unwrap_or("?");
        let _ = write!(when, " on {day}");
    }
    if fields.day_of_month {
        let day = schedule
            .day_of_month
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        let _ = write!(when, " on day {day}");
    }

    let _ = write!(
        out,
        "  {} | {} | keep {} days",
        if schedule.enabled { "enabled" } else { "disabled" },
        when,
        schedule.retention
    );
    if let Some(last_run) = schedule.last_run {
        let _ = write!(out, "\n  Last run: {}", format_date(last_run));
        if let Some(next_run) = schedule.next_run {
            let _ = write!(out, "\n  Next run: {}", format_date(next_run));
        }
    }
    out
}

pub fn render_backup(view: &BackupDetailsView) -> String {
    let mut out = format!("== Backup {} ==\n", view.backup_id());
    if let Some(note) = phase_note(view.phase()) {
        out.push_str(&note);
        return out;
    }
    let (Some(row), Some(detail)) = (view.row(), view.phase().data()) else {
        let _ = write!(out, "  Backup Not Found. {}", backup_details::NOT_FOUND_MESSAGE);
        return out;
    };

    out.push_str(&backup_line(&row));
    let _ = write!(
        out,
        "\n  taken {} | {} | version {}",
        view.timestamp_text().unwrap_or_default(),
        row.files_text,
        detail.backup.version
    );
    let device = &detail.device;
    let _ = write!(
        out,
        "\n  device {} ({}) | os {} | last seen {}",
        device.name,
        device.ip_address,
        device.os_version,
        format_date(device.last_seen)
    );
    if !view.can_restore() {
        out.push_str("\n  (restore available only for completed backups)");
    }
    out
}

pub fn render_toast(notification: &Notification) -> String {
    let marker = if notification.is_error() { "!" } else { "*" };
    format!(
        "[{marker}] {}: {}",
        notification.title, notification.description
    )
}
