//! Recording doubles and page fixtures shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use tokio::sync::oneshot;
use place_actions::app::Environment;
use place_actions::client::{Request, Response, Transport};
use place_actions::dom::{Element, MemoryDocument, MemoryElement};
use place_actions::host::Geolocation;
use place_actions::{initialize, App, Config, Coordinates, Result};

pub const LOADING: &str = "is-loading";

pub const HERE: Coordinates = Coordinates {
    latitude: 51.5,
    longitude: -0.12,
};

/// Ordered record of every externally visible effect.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Transport answering from a queue, 204 once the queue is empty.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Response>>>,
    pub requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn reply(&self, reply: Result<Response>) {
        self.replies.borrow_mut().push_back(reply);
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: Request) -> LocalBoxFuture<'_, Result<Response>> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(204, "No Content", url, "")));
        Box::pin(async move { reply })
    }
}

type Position = std::result::Result<Coordinates, u16>;

/// Geolocation answering with a fixed result and noting whether the watched
/// control was loading when asked.
///
/// After [`ScriptedGeolocation::hold`] requests stay pending until released
/// one by one, oldest first.
pub struct ScriptedGeolocation {
    answer: Cell<Position>,
    held: Cell<bool>,
    pending: RefCell<VecDeque<oneshot::Sender<Position>>>,
    pub calls: Cell<usize>,
    journal: Journal,
    watched: Rc<RefCell<Option<MemoryElement>>>,
}

impl ScriptedGeolocation {
    pub fn answer(&self, answer: Position) {
        self.answer.set(answer);
    }

    pub fn hold(&self) {
        self.held.set(true);
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answers the oldest pending request.
    pub fn release(&self, answer: Position) {
        let sender = self.pending.borrow_mut().pop_front().expect("no pending request");
        sender.send(answer).expect("request was dropped");
    }
}

impl Geolocation for ScriptedGeolocation {
    fn current_position(&self) -> LocalBoxFuture<'_, Position> {
        self.calls.set(self.calls.get() + 1);
        self.journal
            .borrow_mut()
            .push(format!("geolocation loading={}", loading(&self.watched)));
        if self.held.get() {
            let (sender, receiver) = oneshot::channel();
            self.pending.borrow_mut().push_back(sender);
            return Box::pin(async move { receiver.await.unwrap_or(Err(0)) });
        }
        let answer = self.answer.get();
        Box::pin(async move { answer })
    }
}

fn loading(watched: &Rc<RefCell<Option<MemoryElement>>>) -> bool {
    watched
        .borrow()
        .as_ref()
        .is_some_and(|element| element.has_class(LOADING))
}

/// A page plus recording doubles for every capability.
pub struct Harness {
    pub doc: MemoryDocument,
    pub transport: Rc<ScriptedTransport>,
    pub geolocation: Option<Rc<ScriptedGeolocation>>,
    pub journal: Journal,
    pub confirm_answer: Rc<Cell<bool>>,
    watched: Rc<RefCell<Option<MemoryElement>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(true)
    }

    pub fn without_geolocation() -> Self {
        Self::build(false)
    }

    fn build(with_geolocation: bool) -> Self {
        let journal = Journal::default();
        let watched = Rc::new(RefCell::new(None));
        let geolocation = with_geolocation.then(|| {
            Rc::new(ScriptedGeolocation {
                answer: Cell::new(Ok(HERE)),
                held: Cell::new(false),
                pending: RefCell::default(),
                calls: Cell::new(0),
                journal: Rc::clone(&journal),
                watched: Rc::clone(&watched),
            })
        });
        Self {
            doc: MemoryDocument::new(),
            transport: Rc::default(),
            geolocation,
            journal,
            confirm_answer: Rc::new(Cell::new(true)),
            watched,
        }
    }

    /// Records the loading state of `element` alongside every effect.
    pub fn watch(&self, element: &MemoryElement) {
        *self.watched.borrow_mut() = Some(element.clone());
    }

    pub fn entries(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    /// Entries starting with `prefix`, prefix stripped.
    pub fn entries_of(&self, prefix: &str) -> Vec<String> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|entry| entry.strip_prefix(prefix))
            .map(ToString::to_string)
            .collect()
    }

    pub fn app(&self) -> App<MemoryDocument> {
        let confirm_journal = Rc::clone(&self.journal);
        let answer = Rc::clone(&self.confirm_answer);
        let redirect_journal = Rc::clone(&self.journal);
        let redirect_watch = Rc::clone(&self.watched);
        let error_journal = Rc::clone(&self.journal);
        let error_watch = Rc::clone(&self.watched);

        let env = Environment {
            document: Rc::new(self.doc.clone()),
            transport: Rc::clone(&self.transport) as Rc<dyn Transport>,
            geolocation: self
                .geolocation
                .as_ref()
                .map(|geo| Rc::clone(geo) as Rc<dyn Geolocation>),
            confirm: Rc::new(move |prompt: &str| {
                confirm_journal.borrow_mut().push(format!("confirm {prompt}"));
                answer.get()
            }),
            redirect: Rc::new(move |url: &str| {
                let line = format!("redirect {url} loading={}", loading(&redirect_watch));
                redirect_journal.borrow_mut().push(line);
            }),
            errors: Rc::new(move |message: &str| {
                let line = format!("error {message} loading={}", loading(&error_watch));
                error_journal.borrow_mut().push(line);
            }),
        };
        initialize(&Config::default(), env)
    }
}

/// The stock search form: radius, place type, query and both search buttons.
pub fn search_form(doc: &MemoryDocument) -> (MemoryElement, MemoryElement) {
    let form = doc.create_element("form", None);
    form.append("input").with_id("search-radius").with_value("1500");
    form.append("select").with_id("place-type").with_value("restaurant");
    form.append("input").with_id("query").with_value("");
    let nearby = form.append("button").with_id("search-nearby");
    nearby.append("i");
    let text = form.append("button").with_id("search-text");
    (nearby, text)
}
