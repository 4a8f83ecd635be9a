use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};

use crate::model::task::TaskRecord;
use crate::timeline::DateUpdate;
use crate::ui::theme;

/// Actions the detail window can request.
pub enum DetailAction {
    None,
    Close,
    /// Commit the edited due date through the same path a resize uses.
    Commit(DateUpdate),
}

/// Render the task detail window for the opened task.
///
/// `due_edit` is the date-picker buffer, seeded by the app when the window
/// opens; the record itself is only changed by way of the returned commit.
pub fn show_task_detail(
    task: &TaskRecord,
    due_edit: &mut NaiveDate,
    today: NaiveDate,
    ctx: &Context,
) -> DetailAction {
    let mut action = DetailAction::None;
    let interval = task.interval(today);

    Window::new(RichText::new("Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            ui.label(
                RichText::new(&task.title)
                    .strong()
                    .size(14.0)
                    .color(theme::TEXT_PRIMARY),
            );
            if !task.description.is_empty() {
                ui.add_space(2.0);
                ui.label(
                    RichText::new(&task.description)
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                );
            }
            ui.add_space(6.0);

            egui::Grid::new("task_detail_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Status").color(theme::TEXT_DIM).size(10.5));
                    ui.label(
                        RichText::new(format!("{} {}", task.status.icon(), task.status.label()))
                            .size(11.5),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Priority").color(theme::TEXT_DIM).size(10.5));
                    ui.label(RichText::new(task.priority.label()).size(11.5));
                    ui.end_row();

                    if let Some(category) = &task.category {
                        ui.label(RichText::new("Category").color(theme::TEXT_DIM).size(10.5));
                        ui.label(RichText::new(category).size(11.5));
                        ui.end_row();
                    }
                    if let Some(folder) = &task.folder {
                        ui.label(RichText::new("Folder").color(theme::TEXT_DIM).size(10.5));
                        ui.label(RichText::new(folder).size(11.5));
                        ui.end_row();
                    }

                    if !task.assignees.is_empty() {
                        ui.label(RichText::new("Assigned").color(theme::TEXT_DIM).size(10.5));
                        let names: Vec<String> = task
                            .assignees
                            .iter()
                            .map(|a| {
                                a.name()
                                    .map(str::to_string)
                                    .unwrap_or_else(|| "(unknown user)".to_string())
                            })
                            .collect();
                        ui.label(RichText::new(names.join(", ")).size(11.5));
                        ui.end_row();
                    }

                    ui.label(RichText::new("Scheduled").color(theme::TEXT_DIM).size(10.5));
                    ui.label(
                        RichText::new(format!(
                            "{} → {}",
                            interval.start.format("%d/%m/%Y"),
                            interval.end.format("%d/%m/%Y"),
                        ))
                        .size(11.5),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Due date").color(theme::TEXT_DIM).size(10.5));
                    ui.add(
                        egui_extras::DatePickerButton::new(due_edit).id_salt("detail_due_picker"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let apply = egui::Button::new(RichText::new("Apply due date").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([110.0, 26.0], apply).clicked() {
                    action = DetailAction::Commit(DateUpdate {
                        task_id: task.id,
                        start: None,
                        due_date: Some(*due_edit),
                    });
                }
                if ui
                    .add_sized([80.0, 26.0], egui::Button::new("Close"))
                    .clicked()
                {
                    action = DetailAction::Close;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = DetailAction::Close;
    }
    action
}
