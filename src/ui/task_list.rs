use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::task::{TaskRecord, TaskStatus};
use crate::ui::theme;

/// Actions the task list panel can request.
pub enum TaskListAction {
    None,
    Open(Uuid),
}

/// Render the left-side task list panel.
pub fn show_task_list(
    tasks: &[&TaskRecord],
    selected: Option<Uuid>,
    today: NaiveDate,
    ui: &mut Ui,
) -> TaskListAction {
    let mut action = TaskListAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected == Some(task.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, theme::task_color(task.id));

                        // Status icon
                        let status_color = match task.status {
                            TaskStatus::Completed => Color32::from_rgb(90, 190, 120),
                            TaskStatus::InProgress => theme::ACCENT,
                            TaskStatus::Todo => theme::TEXT_DIM,
                        };
                        ui.label(
                            RichText::new(task.status.icon())
                                .size(12.0)
                                .color(status_color),
                        );

                        let title = RichText::new(&task.title).size(12.0).color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        });
                        ui.add(egui::Label::new(title).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                let interval = task.interval(today);
                                ui.label(
                                    RichText::new(interval.end.format("%m/%d").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(
                                    RichText::new(egui_phosphor::regular::CALENDAR_BLANK)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                );
                            },
                        );
                    });
                });

                // Make the whole row clickable
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskListAction::Open(task.id);
                }

                ui.add_space(1.0);
            }

            if tasks.is_empty() {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("No tasks match the current filter")
                            .size(11.0)
                            .color(theme::TEXT_DIM),
                    );
                });
            }
        });

    action
}
