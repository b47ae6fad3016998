use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{
    AppServices, LeaderboardService, QuizFlow, QuizVariant, StaticQuestionSource,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn variant(&self) -> QuizVariant {
        self.services.variant()
    }

    fn quiz(&self) -> Arc<QuizFlow> {
        self.services.quiz()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }

    fn leaderboard_refresh(&self) -> Duration {
        Duration::from_secs(3600)
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_quiz_harness(variant: QuizVariant) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(
        &storage,
        variant,
        Arc::new(StaticQuestionSource::new("What comes next?")),
    );
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app: Arc::new(TestApp { services }),
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        storage,
        handles,
    }
}

/// Render a prop-less root once and return its HTML.
pub fn render_once(root: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(root);
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}
