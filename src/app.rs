use eframe::{egui, App, CreationContext, Frame};
use egui::{RichText, ScrollArea, Ui};

use crate::api::ApiClient;
use crate::views::{HealthplanView, StudioView, UsersView, WorkoutplanView};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Page {
    Studio,
    Healthplan,
    Workoutplan,
    Users,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Studio, Page::Healthplan, Page::Workoutplan, Page::Users];

    pub fn title(self) -> &'static str {
        match self {
            Page::Studio => "Studio",
            Page::Healthplan => "Healthplan",
            Page::Workoutplan => "Workoutplan",
            Page::Users => "Users",
        }
    }
}

/// The one view on screen, owning all of its unsaved input.
pub enum ActiveView {
    Studio(StudioView),
    Healthplan(HealthplanView),
    Workoutplan(WorkoutplanView),
    Users(UsersView),
}

impl ActiveView {
    pub fn open(page: Page) -> Self {
        match page {
            Page::Studio => ActiveView::Studio(StudioView::new()),
            Page::Healthplan => ActiveView::Healthplan(HealthplanView::new()),
            Page::Workoutplan => ActiveView::Workoutplan(WorkoutplanView::new()),
            Page::Users => ActiveView::Users(UsersView::new()),
        }
    }

    pub fn needs_refresh(&self) -> bool {
        match self {
            ActiveView::Studio(view) => view.needs_refresh(),
            ActiveView::Healthplan(view) => view.needs_refresh(),
            ActiveView::Workoutplan(view) => view.needs_refresh(),
            ActiveView::Users(view) => view.needs_refresh(),
        }
    }

    pub fn refresh(&mut self, api: &ApiClient) {
        match self {
            ActiveView::Studio(view) => view.refresh(api),
            ActiveView::Healthplan(view) => view.refresh(api),
            ActiveView::Workoutplan(view) => view.refresh(api),
            ActiveView::Users(view) => view.refresh(api),
        }
    }

    fn ui(&mut self, ui: &mut Ui, api: &ApiClient) {
        match self {
            ActiveView::Studio(view) => view.ui(ui, api),
            ActiveView::Healthplan(view) => view.ui(ui, api),
            ActiveView::Workoutplan(view) => view.ui(ui, api),
            ActiveView::Users(view) => view.ui(ui, api),
        }
    }
}

pub struct AdminApp {
    api: ApiClient,
    page: Page,
    view: ActiveView,
    /// Set once the pending view has been drawn in its loading state.
    loading_shown: bool,
}

impl AdminApp {
    pub fn new(_cc: &CreationContext, api: ApiClient) -> Self {
        Self::with_client(api)
    }

    pub fn with_client(api: ApiClient) -> Self {
        Self {
            api,
            page: Page::Studio,
            view: ActiveView::open(Page::Studio),
            loading_shown: false,
        }
    }

    #[cfg(test)]
    pub fn page(&self) -> Page {
        self.page
    }

    #[cfg(test)]
    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    #[cfg(test)]
    pub fn view_mut(&mut self) -> &mut ActiveView {
        &mut self.view
    }

    /// Switches to `page`, dropping whatever was typed into the previous view.
    pub fn select(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        tracing::debug!("Switching to {:?}", page);
        self.page = page;
        self.view = ActiveView::open(page);
        self.loading_shown = false;
    }

    fn show_navigation(&mut self, ui: &mut Ui) {
        ui.heading("Navigation");
        ui.label(RichText::new("Go to").weak());
        ui.add_space(6.0);
        for page in Page::ALL {
            if ui.selectable_label(self.page == page, page.title()).clicked() {
                self.select(page);
            }
        }
        ui.add_space(20.0);
        ui.label(RichText::new(self.api.base_url()).small().weak());
    }

    fn frame(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .show(ctx, |ui| self.show_navigation(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                self.view.ui(ui, &self.api);
            });
        });

        // Fetch only after a frame showing the loading state has gone out.
        if self.view.needs_refresh() && !ctx.will_discard() {
            if self.loading_shown {
                self.view.refresh(&self.api);
                self.loading_shown = false;
            } else {
                self.loading_shown = true;
            }
            ctx.request_repaint();
        }
    }
}

impl App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.frame(ctx);
    }
}
