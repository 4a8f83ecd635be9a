use egui::{menu, RichText, Ui};

use crate::app::TimelineApp;
use crate::model::task::GroupBy;
use crate::settings::WeekStart;
use crate::timeline::range::NavDirection;
use crate::timeline::ZoomLevel;
use crate::ui::theme;

/// Render the top toolbar: menu bar plus the timeline navigation row.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Reload Tasks").clicked() {
                app.refresh_tasks();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Zoom").small().weak());
            for zoom in ZoomLevel::ALL {
                if ui.radio_value(&mut app.zoom, zoom, zoom.label()).clicked() {
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Week starts on").small().weak());
            for week_start in WeekStart::ALL {
                if ui
                    .radio(app.settings.week_start == week_start, week_start.label())
                    .clicked()
                {
                    app.settings.week_start = week_start;
                    app.settings.save();
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned task count
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} tasks", app.task_count()))
                    .size(11.0)
                    .weak(),
            );
        });
    });

    ui.add_space(4.0);

    // Navigation row: prev / anchor month / next / today, then zoom,
    // grouping and search.
    ui.horizontal(|ui| {
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_LEFT).size(14.0))
            .clicked()
        {
            app.navigate(NavDirection::Prev);
        }
        ui.label(
            RichText::new(app.anchor.format("%B %Y").to_string())
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_RIGHT).size(14.0))
            .clicked()
        {
            app.navigate(NavDirection::Next);
        }
        if ui.button("Today").clicked() {
            app.go_to_today();
        }

        ui.separator();

        for zoom in ZoomLevel::ALL {
            if ui
                .selectable_label(app.zoom == zoom, zoom.label())
                .clicked()
            {
                app.zoom = zoom;
            }
        }

        ui.separator();

        egui::ComboBox::from_id_salt("group_by_combo")
            .selected_text(RichText::new(app.group_by.label()).size(11.5))
            .show_ui(ui, |ui| {
                for group_by in GroupBy::ALL {
                    ui.selectable_value(&mut app.group_by, group_by, group_by.label());
                }
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_sized(
                [180.0, 22.0],
                egui::TextEdit::singleline(&mut app.search_query)
                    .hint_text(format!(
                        "{}  Search timeline...",
                        egui_phosphor::regular::MAGNIFYING_GLASS
                    )),
            );
        });
    });
    ui.add_space(4.0);
}
