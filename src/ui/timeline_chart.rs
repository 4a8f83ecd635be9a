use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use egui::{Align, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::task::{GroupBy, TaskRecord};
use crate::timeline::layout::{layout_timeline, total_rows, BarGeometry, GroupLayout, LayoutParams};
use crate::timeline::range::{interval_bounds, visible_range};
use crate::timeline::session::{DateUpdate, GestureKind, InteractionController, ResizeEdge};
use crate::timeline::{DateAxis, Interval, ZoomLevel};
use crate::ui::theme;

/// Presentation inputs the chart needs each frame.
#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub zoom: ZoomLevel,
    pub anchor: NaiveDate,
    pub group_by: GroupBy,
    pub week_start: Weekday,
    pub today: NaiveDate,
}

/// Result details from interactions in the timeline chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A finished gesture's commit payload, at most one per frame.
    pub commit: Option<DateUpdate>,
    /// A bar was clicked (outside the post-gesture suppression window).
    pub open_task: Option<Uuid>,
}

/// Render the timeline chart area (central panel).
pub fn show_timeline_chart(
    tasks: &[&TaskRecord],
    controller: &mut InteractionController,
    config: &ChartConfig,
    scroll_to_today: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let ppd = config.zoom.pixels_per_day();

    // Fresh derivation every frame: window, axis, geometry.
    let intervals: Vec<Interval> = tasks.iter().map(|t| t.interval(config.today)).collect();
    let range = visible_range(config.anchor, config.zoom, interval_bounds(&intervals));
    let axis = DateAxis::build(range, config.zoom, config.week_start);
    let periods = axis.period_groups();

    let live = controller
        .active_task()
        .and_then(|id| controller.override_for(id).map(|iv| (id, iv)));
    let params = LayoutParams {
        range,
        pixels_per_day: ppd,
        min_bar_width: theme::MIN_BAR_WIDTH,
        today: config.today,
    };
    let layouts = layout_timeline(tasks, config.group_by, &params, live);
    let by_id: HashMap<Uuid, &TaskRecord> = tasks.iter().map(|t| (t.id, *t)).collect();

    let grouped = config.group_by != GroupBy::None;
    let header_height = if periods.is_empty() {
        theme::HEADER_DAY_HEIGHT
    } else {
        theme::HEADER_PERIOD_HEIGHT + theme::HEADER_DAY_HEIGHT
    };
    let group_header_height = if grouped { theme::GROUP_HEADER_HEIGHT } else { 0.0 };
    let rows_height = |count: usize| {
        count as f32 * (theme::ROW_HEIGHT + theme::ROW_GAP) + theme::GROUP_PADDING
    };
    let body_height: f32 = layouts
        .iter()
        .map(|g| group_header_height + rows_height(g.row_count))
        .sum();

    let available = ui.available_size();
    let chart_width = (axis.len() as f32 * ppd).max(available.x);
    let chart_height = (header_height + body_height + 60.0).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_header(&painter, origin, &axis, &periods, ppd, chart_height);
            draw_today_line(&painter, origin, &axis, config.today, ppd, header_height, chart_height);

            // Group blocks, stacked under the header.
            let mut block_top = origin.y + header_height;
            for group in &layouts {
                if grouped {
                    draw_group_band(
                        &painter,
                        origin,
                        block_top,
                        chart_width,
                        group,
                        config.group_by,
                    );
                }
                let rows_top = block_top + group_header_height + theme::GROUP_PADDING * 0.5;

                for bar in &group.bars {
                    let row_within = bar.row - group.row_offset;
                    let y = rows_top + row_within as f32 * (theme::ROW_HEIGHT + theme::ROW_GAP);
                    let Some(task) = by_id.get(&bar.task_id) else {
                        continue;
                    };
                    bar_ui(
                        ui,
                        &painter,
                        origin,
                        task,
                        bar,
                        y,
                        config.today,
                        controller,
                        &mut interaction,
                    );
                }

                block_top += group_header_height + rows_height(group.row_count);
            }

            // Empty state: nothing visible in this window.
            if total_rows(&layouts) == 0 {
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No tasks in this window",
                    theme::font_header(),
                    theme::TEXT_DIM,
                );
            }

            // Consume the pending pointer position: one relayout per frame,
            // whatever number of moves arrived since the last one.
            if controller.tick(range.start, ppd) {
                ui.ctx().request_repaint();
            }

            if scroll_to_today {
                if let Some(index) = axis.index_of(config.today) {
                    let x = origin.x + index as f32 * ppd;
                    let marker =
                        Rect::from_min_size(Pos2::new(x, origin.y), Vec2::new(ppd, 10.0));
                    ui.scroll_to_rect(marker, Some(Align::Center));
                }
            }
        });

    interaction
}

/// Draw one task bar and wire its drag/resize/click interactions.
#[allow(clippy::too_many_arguments)]
fn bar_ui(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    task: &TaskRecord,
    bar: &BarGeometry,
    y: f32,
    today: NaiveDate,
    controller: &mut InteractionController,
    interaction: &mut ChartInteraction,
) {
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + bar.left, y + theme::BAR_INSET),
        Vec2::new(bar.width, theme::ROW_HEIGHT - theme::BAR_INSET * 2.0),
    );
    let session_kind = if controller.active_task() == Some(task.id) {
        controller.kind()
    } else {
        None
    };

    draw_task_bar(painter, bar_rect, task, session_kind);

    let bar_response = ui.interact(
        bar_rect,
        ui.make_persistent_id(("timeline-bar", task.id)),
        Sense::click_and_drag(),
    );
    let left_handle = Rect::from_min_max(
        Pos2::new(bar_rect.left() - theme::HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.left() + theme::HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    );
    let right_handle = Rect::from_min_max(
        Pos2::new(bar_rect.right() - theme::HANDLE_WIDTH * 0.5, bar_rect.top()),
        Pos2::new(bar_rect.right() + theme::HANDLE_WIDTH * 0.5, bar_rect.bottom()),
    );
    let left_response = ui.interact(
        left_handle.expand(4.0),
        ui.make_persistent_id(("timeline-resize-left", task.id)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle.expand(4.0),
        ui.make_persistent_id(("timeline-resize-right", task.id)),
        Sense::drag(),
    );

    // Gesture begin: snapshot the committed interval. Handles win over the
    // bar body so an edge grab never starts a move.
    let committed = task.interval(today);
    if left_response.drag_started() {
        controller.begin_resize(task.id, committed, ResizeEdge::Start);
    } else if right_response.drag_started() {
        controller.begin_resize(task.id, committed, ResizeEdge::End);
    } else if bar_response.drag_started() {
        if let Some(pos) = bar_response.interact_pointer_pos() {
            controller.begin_drag(task.id, committed, pos.x - origin.x, bar.left);
        }
    }

    // Gesture move: only the latest position is kept; the per-frame tick
    // in the chart body turns it into a proposal.
    if left_response.dragged() || right_response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        if let Some(pos) = left_response
            .interact_pointer_pos()
            .or_else(|| right_response.interact_pointer_pos())
        {
            controller.pointer_moved(pos.x - origin.x);
        }
    } else if bar_response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        if let Some(pos) = bar_response.interact_pointer_pos() {
            controller.pointer_moved(pos.x - origin.x);
        }
    }

    // Gesture end: a single commit payload, or none for a dead click.
    if bar_response.drag_stopped()
        || left_response.drag_stopped()
        || right_response.drag_stopped()
    {
        if let Some(update) = controller.release() {
            interaction.commit = Some(update);
        }
    }

    if bar_response.clicked() && !controller.suppress_click() {
        interaction.open_task = Some(task.id);
    }

    // Handle affordances.
    if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
        if left_response.hovered() || right_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        } else if session_kind.is_none() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        let lh = Rect::from_min_size(
            Pos2::new(bar_rect.left() - 1.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        let rh = Rect::from_min_size(
            Pos2::new(bar_rect.right() - 2.5, handle_y),
            Vec2::new(4.0, handle_h),
        );
        painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
        painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
    }

    // Tooltip on hover.
    if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
        let interval = bar.interval;
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("timeline-tip", task.id)),
            |ui| {
                ui.strong(&task.title);
                ui.label(format!(
                    "{} → {}",
                    interval.start.format("%d/%m/%Y"),
                    interval.end.format("%d/%m/%Y"),
                ));
                ui.label(format!(
                    "{} {}",
                    task.status.icon(),
                    task.status.label()
                ));
            },
        );
    }
}

fn draw_task_bar(
    painter: &egui::Painter,
    bar_rect: Rect,
    task: &TaskRecord,
    session_kind: Option<GestureKind>,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, theme::task_color(task.id));

    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Live session ring: blue while moving, amber while resizing.
    match session_kind {
        Some(GestureKind::Drag) => {
            painter.rect_stroke(
                bar_rect.expand(1.5),
                Rounding::same(theme::BAR_ROUNDING + 1.5),
                Stroke::new(2.0, theme::BORDER_ACCENT),
            );
        }
        Some(GestureKind::Resize(_)) => {
            painter.rect_stroke(
                bar_rect.expand(1.5),
                Rounding::same(theme::BAR_ROUNDING + 1.5),
                Stroke::new(2.0, theme::RESIZE_RING),
            );
        }
        None => {}
    }

    // Task title on bar (single line, clipped to bar bounds)
    if bar_rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(task.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    axis: &DateAxis,
    periods: &[crate::timeline::PeriodGroup],
    ppd: f32,
    chart_height: f32,
) {
    let width = axis.len() as f32 * ppd;
    let period_height = if periods.is_empty() {
        0.0
    } else {
        theme::HEADER_PERIOD_HEIGHT
    };
    let header_height = period_height + theme::HEADER_DAY_HEIGHT;

    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, header_height)),
        0.0,
        theme::BG_HEADER,
    );

    // Period band (weeks / months / quarters).
    let mut x = origin.x;
    for period in periods {
        let span_px = period.span_days as f32 * ppd;
        painter.line_segment(
            [
                Pos2::new(x, origin.y),
                Pos2::new(x, origin.y + period_height),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        painter.text(
            Pos2::new(x + 4.0, origin.y + period_height / 2.0),
            egui::Align2::LEFT_CENTER,
            &period.label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        x += span_px;
    }

    // Day cells plus full-height grid lines.
    for (index, date) in axis.days().iter().enumerate() {
        let x = origin.x + index as f32 * ppd;
        painter.line_segment(
            [
                Pos2::new(x, origin.y + header_height),
                Pos2::new(x, origin.y + chart_height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        let label = axis.day_label(*date);
        if !label.is_empty() {
            painter.text(
                Pos2::new(x + 3.0, origin.y + period_height + theme::HEADER_DAY_HEIGHT - 8.0),
                egui::Align2::LEFT_CENTER,
                label,
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + header_height),
            Pos2::new(origin.x + width, origin.y + header_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    axis: &DateAxis,
    today: NaiveDate,
    ppd: f32,
    header_height: f32,
    chart_height: f32,
) {
    // No marker when today is outside the visible window.
    let Some(index) = axis.index_of(today) else {
        return;
    };
    let x = origin.x + index as f32 * ppd;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + header_height),
            Pos2::new(x, origin.y + chart_height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + header_height - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_group_band(
    painter: &egui::Painter,
    origin: Pos2,
    top: f32,
    width: f32,
    group: &GroupLayout,
    group_by: GroupBy,
) {
    let band = Rect::from_min_size(
        Pos2::new(origin.x, top),
        Vec2::new(width, theme::GROUP_HEADER_HEIGHT),
    );
    painter.rect_filled(band, 0.0, theme::BG_GROUP_BAND);
    painter.line_segment(
        [band.left_bottom(), band.right_bottom()],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    let icon = match group_by {
        GroupBy::Folder => egui_phosphor::regular::FOLDER,
        GroupBy::Category => egui_phosphor::regular::TAG,
        GroupBy::Assignee => egui_phosphor::regular::USER,
        GroupBy::Status | GroupBy::None => egui_phosphor::regular::CIRCLE,
    };
    painter.text(
        Pos2::new(band.left() + 8.0, band.center().y),
        egui::Align2::LEFT_CENTER,
        format!("{} {}  ({})", icon, group.key, group.bars.len()),
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );
}
