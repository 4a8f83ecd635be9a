use chrono::NaiveDate;
use uuid::Uuid;

use crate::data::TaskStore;
use crate::model::task::{resolve_assignees, utc_midnight, GroupBy, TaskRecord};
use crate::model::user::UserDirectory;
use crate::settings::AppSettings;
use crate::timeline::range::{shift_anchor, NavDirection};
use crate::timeline::session::InteractionController;
use crate::timeline::{DateUpdate, ZoomLevel};
use crate::ui;
use crate::ui::task_detail::DetailAction;
use crate::ui::task_list::TaskListAction;
use crate::ui::timeline_chart::ChartConfig;

/// Main application state.
pub struct TimelineApp {
    store: TaskStore,
    /// Authoritative task list; replaced wholesale on fetch, patched in
    /// place after a successful commit, never touched mid-gesture.
    tasks: Vec<TaskRecord>,
    pub settings: AppSettings,

    // Timeline view state
    pub zoom: ZoomLevel,
    pub anchor: NaiveDate,
    pub group_by: GroupBy,
    pub search_query: String,
    controller: InteractionController,
    scroll_to_today: bool,

    // Dialog state
    pub show_about: bool,
    detail_task: Option<Uuid>,
    detail_due: NaiveDate,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = AppSettings::load();
        let today = chrono::Local::now().date_naive();
        let store = TaskStore::open(TaskStore::default_path());

        let mut app = Self {
            store,
            tasks: Vec::new(),
            zoom: settings.default_zoom,
            group_by: settings.default_group_by,
            settings,
            anchor: today,
            search_query: String::new(),
            controller: InteractionController::new(),
            scroll_to_today: true,
            show_about: false,
            detail_task: None,
            detail_due: today,
            status_message: "Ready".to_string(),
        };
        app.refresh_tasks();
        app
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Replace the task list from the store. Skipped while a gesture is
    /// live so the preview never races a list swap.
    pub fn refresh_tasks(&mut self) {
        if self.controller.is_active() {
            return;
        }
        match self.store.fetch() {
            Ok((mut tasks, users)) => {
                let directory = UserDirectory::new(users);
                resolve_assignees(&mut tasks, &directory);
                self.status_message = format!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            Err(e) => {
                log::error!("task fetch failed: {e}");
                self.status_message = format!("Could not load tasks: {e}");
            }
        }
    }

    pub fn navigate(&mut self, direction: NavDirection) {
        self.anchor = shift_anchor(self.anchor, self.zoom, direction);
    }

    pub fn go_to_today(&mut self) {
        self.anchor = chrono::Local::now().date_naive();
        self.scroll_to_today = true;
    }

    fn open_detail(&mut self, task_id: Uuid) {
        let today = chrono::Local::now().date_naive();
        if let Some(task) = self.tasks.iter().find(|t| t.id == task_id) {
            self.detail_due = task.interval(today).end;
            self.detail_task = Some(task_id);
        }
    }

    /// Persist a finished gesture (or detail edit) and reflect it locally.
    ///
    /// On success the one affected record is patched in place, which keeps
    /// the scroll position; the list itself is not refetched. On failure
    /// the user gets a blocking notification and the list is refetched so
    /// the view reconciles with whatever the store actually holds.
    fn handle_commit(&mut self, update: DateUpdate) {
        match self.store.apply_date_update(&update) {
            Ok(()) => {
                let today = chrono::Local::now().date_naive();
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == update.task_id) {
                    if let Some(start) = update.start {
                        task.start_time = Some(utc_midnight(start));
                    }
                    if let Some(due) = update.due_date {
                        task.due_date = Some(utc_midnight(due));
                    }
                    let interval = task.interval(today);
                    self.status_message = format!(
                        "Rescheduled '{}' ({} → {})",
                        task.title,
                        interval.start.format("%Y-%m-%d"),
                        interval.end.format("%Y-%m-%d")
                    );
                }
            }
            Err(e) => {
                log::error!("date update for {} failed: {e}", update.task_id);
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Update failed")
                    .set_description(format!("Could not save the new dates:\n{e}"))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
                self.refresh_tasks();
                self.status_message = "Update failed, reloaded tasks".to_string();
            }
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        let today = chrono::Local::now().date_naive();

        // Keyboard shortcuts outside closures to avoid borrow issues
        let should_reload =
            ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::R));
        if should_reload {
            self.refresh_tasks();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Zoom: {}", self.zoom.label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task list
        let mut list_action = TaskListAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(260.0)
            .min_width(200.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                let filtered: Vec<&TaskRecord> = self
                    .tasks
                    .iter()
                    .filter(|t| t.matches(&self.search_query))
                    .collect();
                list_action =
                    ui::task_list::show_task_list(&filtered, self.detail_task, today, ui);
            });
        if let TaskListAction::Open(task_id) = list_action {
            self.open_detail(task_id);
        }

        // Central panel: timeline chart
        let mut chart_commit = None;
        let mut chart_open = None;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let filtered: Vec<&TaskRecord> = self
                .tasks
                .iter()
                .filter(|t| t.matches(&self.search_query))
                .collect();
            let config = ChartConfig {
                zoom: self.zoom,
                anchor: self.anchor,
                group_by: self.group_by,
                week_start: self.settings.week_start.weekday(),
                today,
            };
            let chart = ui::timeline_chart::show_timeline_chart(
                &filtered,
                &mut self.controller,
                &config,
                self.scroll_to_today,
                ui,
            );
            chart_commit = chart.commit;
            chart_open = chart.open_task;
        });
        self.scroll_to_today = false;
        if let Some(update) = chart_commit {
            self.handle_commit(update);
        }
        if let Some(task_id) = chart_open {
            self.open_detail(task_id);
        }

        // Task detail window
        if let Some(task_id) = self.detail_task {
            let action = match self.tasks.iter().find(|t| t.id == task_id) {
                Some(task) => {
                    ui::task_detail::show_task_detail(task, &mut self.detail_due, today, ctx)
                }
                None => DetailAction::Close,
            };
            match action {
                DetailAction::Commit(update) => self.handle_commit(update),
                DetailAction::Close => self.detail_task = None,
                DetailAction::None => {}
            }
        }

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
