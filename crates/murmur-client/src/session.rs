//! The view-state session.
//!
//! [`Session`] owns every piece of state the chat view depends on: the message
//! log, the current conversation, scroll position, aliases, unread threads and
//! read markers. The host feeds it events one at a time (a message arrived,
//! an alias was claimed, a key was pressed, the terminal was resized) and
//! asks it for the lines to draw.
//!
//! Every write that can change which messages belong to the current
//! conversation rebuilds the filtered view before returning.

use std::any::Any;

use murmur_shared::{same_recipients, AuthorId, Message, Mode, RecipientSet};
use murmur_store::{Database, KeyValueStore};
use serde::Serialize;
use tracing::{debug, info};

use crate::authors::{AuthorClaim, AuthorDirectory};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::filter::ConversationFilter;
use crate::message_log::MessageLog;
use crate::notifications::NotificationTracker;
use crate::read_state::ReadStateTracker;
use crate::viewport::{self, ScrollState, Viewport};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub mode: Mode,
    pub lines: Vec<String>,
    pub scroll: ScrollState,
    pub notifications: Vec<RecipientSet>,
    pub recipients: Vec<String>,
    pub system_message: Option<String>,
    pub thread_root: Option<String>,
}

/// Single-session view state. Not thread-safe; events must arrive serially.
pub struct Session<S> {
    config: ClientConfig,
    authors: AuthorDirectory,
    read_state: ReadStateTracker<S>,
    notifications: NotificationTracker,

    log: MessageLog,
    filter: ConversationFilter,

    viewport: Viewport,
    scroll: ScrollState,
    visible_count: usize,
    input: String,
    last_input: String,

    mode: Mode,
    private_recipients: Vec<AuthorId>,
    last_private_recipients: Vec<AuthorId>,
    recipient_names: Vec<String>,
    thread_root: Option<String>,
    system_message: Option<String>,

    client: Option<Box<dyn Any>>,
}

impl Session<Database> {
    /// Start a session backed by the read-state database `config` points at.
    pub fn open(me: AuthorId, config: ClientConfig) -> Result<Self> {
        let db = config.open_database()?;
        Ok(Self::new(me, db, config))
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(me: AuthorId, store: S, config: ClientConfig) -> Self {
        info!(me = %me, "starting view session");
        Self {
            read_state: ReadStateTracker::new(store, config.retention_window),
            authors: AuthorDirectory::new(me),
            config,
            notifications: NotificationTracker::new(),
            log: MessageLog::new(),
            filter: ConversationFilter::new(),
            viewport: Viewport::default(),
            scroll: ScrollState::default(),
            visible_count: 0,
            input: String::new(),
            last_input: String::new(),
            mode: Mode::Public,
            private_recipients: Vec::new(),
            last_private_recipients: Vec::new(),
            recipient_names: Vec::new(),
            thread_root: None,
            system_message: None,
            client: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    pub fn me(&self) -> &AuthorId {
        self.authors.me()
    }

    /// Aliases claimed for the local identity, used to spot one's own
    /// messages under any handle.
    pub fn me_names(&self) -> impl Iterator<Item = &str> {
        self.authors.me_names().iter().map(String::as_str)
    }

    /// Store the transport handle. The session never looks inside it.
    pub fn set_client<T: Any>(&mut self, client: T) {
        self.client = Some(Box::new(client));
    }

    pub fn client<T: Any>(&self) -> Option<&T> {
        self.client.as_ref().and_then(|c| c.downcast_ref::<T>())
    }

    // ------------------------------------------------------------------
    // Viewport and input
    // ------------------------------------------------------------------

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height, self.config.chrome_rows);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn width(&self) -> u16 {
        self.viewport.width
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Rows the input box currently takes, `0` before the first resize.
    pub fn input_lines(&self) -> usize {
        self.viewport.input_lines(&self.input).unwrap_or(0)
    }

    pub fn set_last_input(&mut self, input: impl Into<String>) {
        self.last_input = input.into();
    }

    pub fn last_input(&self) -> &str {
        &self.last_input
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Lines to draw in the message pane, oldest first, as `"<time>  <text>"`.
    ///
    /// Packing may snap the scroll position back to the bottom, so this takes
    /// `&mut self`.
    pub fn visible_lines(&mut self) -> Vec<String> {
        let filtered = self.filter.messages(&self.log);
        let visible = viewport::pack(&filtered, &self.viewport, &self.input, &mut self.scroll);
        self.visible_count = visible.len();
        visible.iter().map(|msg| msg.rendered()).collect()
    }

    pub fn page_up(&mut self) {
        self.scroll
            .page_up(self.filter.len(), self.visible_count, &self.viewport);
    }

    pub fn page_down(&mut self) {
        self.scroll
            .page_down(self.filter.len(), self.visible_count, &self.viewport);
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    // ------------------------------------------------------------------
    // Authors
    // ------------------------------------------------------------------

    pub fn resolve_alias(&self, author: &AuthorId) -> String {
        self.authors.resolve_alias(author)
    }

    pub fn resolve_id(&self, name: &str) -> AuthorId {
        self.authors.resolve_id(name)
    }

    pub fn author_claim(&self, author: &AuthorId) -> Option<&AuthorClaim> {
        self.authors.get(author)
    }

    pub fn claim_alias(&mut self, author: &AuthorId, alias: &str, claimant: &AuthorId) {
        self.authors.claim(author, alias, claimant);
        self.refresh_recipient_names();
        self.refresh_filter();
    }

    /// Alias claim straight from a transport payload; non-text values are
    /// ignored.
    pub fn claim_alias_value(
        &mut self,
        author: &AuthorId,
        alias: &serde_json::Value,
        claimant: &AuthorId,
    ) {
        if self.authors.claim_value(author, alias, claimant) {
            self.refresh_recipient_names();
            self.refresh_filter();
        }
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_private(&self) -> bool {
        self.mode.is_private()
    }

    /// Switch to the private thread with the active recipients and mark all of
    /// it read.
    pub fn enter_private(&mut self) -> Result<()> {
        self.mode = Mode::Private;
        self.system_message = None;
        self.scroll.reset();
        self.refresh_filter();

        // Replies hang off the newest message in the thread; an empty thread
        // gets its root from the first message that arrives.
        if let Some(last) = self.filter.last(&self.log) {
            self.thread_root = Some(last.key.clone());
        }

        info!(
            participants = self.private_recipients.len(),
            messages = self.filter.len(),
            "entered private mode"
        );

        for msg in self.filter.messages(&self.log) {
            self.read_state.mark_read(msg)?;
        }
        Ok(())
    }

    pub fn enter_public(&mut self) {
        self.mode = Mode::Public;
        self.reset_private_recipients();
        self.system_message = None;
        self.scroll.reset();
        self.refresh_filter();
        info!(messages = self.filter.len(), "entered public mode");
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Ingest a message from the transport.
    ///
    /// Clears any system notice, places the message by timestamp, raises a
    /// notification for unread private threads other than the one on screen,
    /// and refreshes the filtered view.
    pub fn push_message(&mut self, msg: Message) -> Result<()> {
        self.system_message = None;
        let position = self.log.insert(msg);
        let tracked = self.track_private_arrival(position);
        self.refresh_filter();
        tracked
    }

    fn track_private_arrival(&mut self, position: usize) -> Result<()> {
        let Some(msg) = self.log.messages().get(position) else {
            return Ok(());
        };
        if !msg.private {
            return Ok(());
        }

        if self.mode.is_private() && self.thread_root.is_none() {
            self.thread_root = Some(msg.key.clone());
        }

        let Some(recipients) = msg.recipients.as_deref() else {
            return Ok(());
        };
        let me = self.authors.me();
        if msg.raw_author == *me {
            return Ok(());
        }

        let on_screen =
            self.mode.is_private() && same_recipients(&self.private_recipients, recipients);
        if on_screen {
            return Ok(());
        }

        let others = RecipientSet::from_slice(recipients).without(me);
        if self.notifications.contains(&others) || self.read_state.is_read(msg)? {
            return Ok(());
        }
        debug!(key = %msg.key, author = %msg.raw_author, "private message raised notification");
        self.notifications.notify(others);
        Ok(())
    }

    /// The messages of the current conversation, oldest first.
    pub fn messages(&self) -> Vec<&Message> {
        self.filter.messages(&self.log)
    }

    /// Every message received, regardless of conversation.
    pub fn all_messages(&self) -> &[Message] {
        self.log.messages()
    }

    pub fn push_system_message(&mut self, notice: impl Into<String>) {
        self.system_message = Some(notice.into());
    }

    pub fn system_message(&self) -> Option<&str> {
        self.system_message.as_deref()
    }

    pub fn reset_system_message(&mut self) {
        self.system_message = None;
    }

    pub fn thread_root(&self) -> Option<&str> {
        self.thread_root.as_deref()
    }

    fn refresh_filter(&mut self) {
        self.filter
            .refresh(&self.log, self.mode, &self.private_recipients);
    }

    // ------------------------------------------------------------------
    // Recipients
    // ------------------------------------------------------------------

    pub fn private_recipients(&self) -> &[AuthorId] {
        &self.private_recipients
    }

    /// Display names of the active recipients, the local identity left out.
    pub fn private_recipients_not_me(&self) -> &[String] {
        &self.recipient_names
    }

    /// Recipients of the private thread most recently left.
    pub fn last_private_recipients(&self) -> &[AuthorId] {
        &self.last_private_recipients
    }

    /// Open the private thread with `recipients` (the local identity is always
    /// added), dismissing its notification.
    pub fn set_private_recipients(&mut self, recipients: Vec<AuthorId>) -> Result<()> {
        let mut unique: Vec<AuthorId> = Vec::with_capacity(recipients.len() + 1);
        for id in recipients.into_iter().chain(std::iter::once(self.me().clone())) {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        self.notifications.clear(&unique, self.authors.me());
        self.private_recipients = unique;
        self.refresh_recipient_names();
        self.enter_private()
    }

    /// Forget the active recipients, remembering them for quick reuse.
    pub fn reset_private_recipients(&mut self) {
        self.last_private_recipients = std::mem::take(&mut self.private_recipients);
        self.thread_root = None;
        self.refresh_recipient_names();
    }

    fn refresh_recipient_names(&mut self) {
        let me = self.authors.me();
        self.recipient_names = self
            .private_recipients
            .iter()
            .filter(|id| *id != me)
            .map(|id| self.authors.resolve_alias(id))
            .collect();
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn notifications(&self) -> &[RecipientSet] {
        self.notifications.all()
    }

    pub fn last_notification(&self) -> RecipientSet {
        self.notifications.last()
    }

    pub fn clear_notification(&mut self, recipients: &[AuthorId]) {
        self.notifications.clear(recipients, self.authors.me());
    }

    pub fn reset_notifications(&mut self) {
        self.notifications.reset();
    }

    // ------------------------------------------------------------------
    // Read state
    // ------------------------------------------------------------------

    pub fn is_read(&self, msg: &Message) -> Result<bool> {
        self.read_state.is_read(msg)
    }

    pub fn mark_read(&self, msg: &Message) -> Result<()> {
        self.read_state.mark_read(msg)
    }

    pub fn store(&self) -> &S {
        self.read_state.store()
    }

    /// Bundle the derived views for one render pass.
    pub fn snapshot(&mut self) -> ViewSnapshot {
        let lines = self.visible_lines();
        ViewSnapshot {
            mode: self.mode,
            lines,
            scroll: self.scroll,
            notifications: self.notifications.all().to_vec(),
            recipients: self.recipient_names.clone(),
            system_message: self.system_message.clone(),
            thread_root: self.thread_root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use murmur_store::MemoryStore;
    use serde_json::json;

    fn ids(raw: &[&str]) -> Vec<AuthorId> {
        raw.iter().map(|s| AuthorId::from(*s)).collect()
    }

    fn session() -> Session<MemoryStore> {
        Session::new("@me".into(), MemoryStore::new(), ClientConfig::default())
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn dm(key: &str, at: i64, author: &str, recipients: &[&str]) -> Message {
        Message::private(key, at, author, ids(recipients), format!("dm {key}")).with_time("12:00")
    }

    fn post(key: &str, at: i64, author: &str) -> Message {
        Message::public(key, at, author, format!("post {key}")).with_time("12:00")
    }

    fn keys(session: &Session<MemoryStore>) -> Vec<String> {
        session.messages().iter().map(|m| m.key.clone()).collect()
    }

    #[test]
    fn test_out_of_order_push_keeps_log_sorted() {
        let mut s = session();
        let t = now();
        s.push_message(post("a", t + 5, "@ann")).unwrap();
        s.push_message(post("b", t + 1, "@ann")).unwrap();
        s.push_message(post("c", t + 3, "@ann")).unwrap();
        let times: Vec<i64> = s.all_messages().iter().map(|m| m.raw_time - t).collect();
        assert_eq!(times, vec![1, 3, 5]);
        assert_eq!(keys(&s), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_notification_dedup_for_same_thread() {
        let mut s = session();
        let t = now();
        s.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("d2", t + 1, "@ann", &["@me", "@ann"])).unwrap();
        assert_eq!(s.notifications(), &[RecipientSet::from_slice(&ids(&["@ann"]))]);

        s.push_message(dm("d3", t + 2, "@bob", &["@bob", "@me"])).unwrap();
        assert_eq!(s.notifications().len(), 2);
        assert_eq!(s.last_notification(), RecipientSet::from_slice(&ids(&["@bob"])));

        // private messages stay out of the public view
        assert!(keys(&s).is_empty());
    }

    #[test]
    fn test_viewing_the_thread_suppresses_notification() {
        let mut s = session();
        let t = now();
        s.set_private_recipients(ids(&["@ann"])).unwrap();
        s.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        assert!(s.notifications().is_empty());
        assert_eq!(keys(&s), vec!["d1"]);

        // a different thread still notifies while in private mode
        s.push_message(dm("d2", t + 1, "@bob", &["@bob", "@me"])).unwrap();
        assert_eq!(s.notifications().len(), 1);
        assert_eq!(keys(&s), vec!["d1"]);
    }

    #[test]
    fn test_own_messages_do_not_notify() {
        let mut s = session();
        s.push_message(dm("d1", now(), "@me", &["@ann", "@me"])).unwrap();
        assert!(s.notifications().is_empty());
    }

    #[test]
    fn test_read_messages_do_not_notify() {
        let mut s = session();
        let msg = dm("d1", now(), "@ann", &["@ann", "@me"]);
        s.mark_read(&msg).unwrap();
        s.push_message(msg).unwrap();
        assert!(s.notifications().is_empty());
    }

    #[test]
    fn test_set_recipients_adds_me_and_clears_notification() {
        let mut s = session();
        let t = now();
        s.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("d2", t + 1, "@bob", &["@bob", "@me"])).unwrap();
        s.claim_alias(&"@ann".into(), "annie", &"@ann".into());

        s.set_private_recipients(ids(&["@ann", "@ann"])).unwrap();

        assert_eq!(s.mode(), Mode::Private);
        assert_eq!(s.private_recipients(), ids(&["@ann", "@me"]).as_slice());
        assert_eq!(s.private_recipients_not_me(), &["@annie".to_string()]);
        assert_eq!(s.notifications(), &[RecipientSet::from_slice(&ids(&["@bob"]))]);
        assert_eq!(keys(&s), vec!["d1"]);
        assert_eq!(s.thread_root(), Some("d1"));

        // entering the thread marked it read
        let d1 = s.messages()[0].clone();
        assert!(s.is_read(&d1).unwrap());
        let d2 = s.all_messages().iter().find(|m| m.key == "d2").cloned().unwrap();
        assert!(!s.is_read(&d2).unwrap());
    }

    #[test]
    fn test_enter_public_remembers_recipients() {
        let mut s = session();
        let t = now();
        s.push_message(post("p1", t, "@ann")).unwrap();
        s.push_message(dm("d1", t + 1, "@ann", &["@ann", "@me"])).unwrap();
        s.set_private_recipients(ids(&["@ann"])).unwrap();
        s.push_system_message("now talking to @ann");

        s.enter_public();

        assert_eq!(s.mode(), Mode::Public);
        assert!(s.private_recipients().is_empty());
        assert!(s.private_recipients_not_me().is_empty());
        assert_eq!(s.last_private_recipients(), ids(&["@ann", "@me"]).as_slice());
        assert_eq!(s.thread_root(), None);
        assert_eq!(s.system_message(), None);
        assert_eq!(keys(&s), vec!["p1"]);
    }

    #[test]
    fn test_thread_root_set_by_first_arrival() {
        let mut s = session();
        s.set_private_recipients(ids(&["@cat"])).unwrap();
        assert_eq!(s.thread_root(), None);

        s.push_message(dm("d1", now(), "@cat", &["@cat", "@me"])).unwrap();
        assert_eq!(s.thread_root(), Some("d1"));

        s.push_message(dm("d2", now() + 1, "@cat", &["@cat", "@me"])).unwrap();
        assert_eq!(s.thread_root(), Some("d1"));
    }

    #[test]
    fn test_system_message_cleared_by_new_message() {
        let mut s = session();
        s.push_system_message("connecting...");
        assert_eq!(s.system_message(), Some("connecting..."));
        s.push_message(post("p1", now(), "@ann")).unwrap();
        assert_eq!(s.system_message(), None);

        s.push_system_message("again");
        s.reset_system_message();
        assert_eq!(s.system_message(), None);
    }

    #[test]
    fn test_alias_claims_through_session() {
        let mut s = session();
        let bob = AuthorId::from("@abc123");
        s.claim_alias(&bob, "bob", &bob);
        assert_eq!(s.resolve_alias(&bob), "@bob");
        assert_eq!(s.resolve_id("bob"), bob);

        s.claim_alias(&bob, "@bob2", &"@xyz".into());
        assert_eq!(s.resolve_alias(&bob), "@bob2");
        assert_eq!(s.author_claim(&bob).unwrap().claimed_by, AuthorId::from("@xyz"));

        s.claim_alias_value(&bob, &json!(["not", "text"]), &bob);
        assert_eq!(s.resolve_alias(&bob), "@bob2");

        let me = s.me().clone();
        s.claim_alias_value(&me, &json!("myself"), &me);
        assert_eq!(s.me_names().collect::<Vec<_>>(), vec!["@myself"]);
    }

    #[test]
    fn test_visible_lines_and_scroll() {
        let mut s = session();
        s.set_viewport(80, 16);
        let t = now();
        for i in 0..20 {
            s.push_message(post(&format!("p{i}"), t + i, "@ann")).unwrap();
        }

        let lines = s.visible_lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines.last().map(String::as_str), Some("12:00  post p19"));

        s.page_up();
        let lines = s.visible_lines();
        assert_eq!(lines.first().map(String::as_str), Some("12:00  post p4"));
        assert!(s.scroll().is_scrolling);

        // new arrivals keep the scroll position
        s.push_message(post("late", t + 100, "@bob")).unwrap();
        assert_eq!(s.visible_lines().first().map(String::as_str), Some("12:00  post p4"));

        // a mode switch goes back to the live view
        s.set_private_recipients(ids(&["@ann"])).unwrap();
        s.enter_public();
        assert_eq!(*s.scroll(), ScrollState::default());
        assert_eq!(s.visible_lines().last().map(String::as_str), Some("12:00  post late"));
    }

    #[test]
    fn test_input_lines() {
        let mut s = session();
        assert_eq!(s.input_lines(), 0);
        s.set_viewport(10, 20);
        s.set_input("123456789");
        assert_eq!(s.input(), "123456789");
        assert_eq!(s.input_lines(), 2);

        s.set_last_input("/pm @ann");
        assert_eq!(s.last_input(), "/pm @ann");
    }

    #[test]
    fn test_extreme_timestamps_do_not_crash() {
        let mut s = session();
        s.set_viewport(80, 16);
        s.push_message(dm("far", i64::MAX, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("beyond", 9_000_000_000_000_000, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("epoch", 0, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("before", -5, "@ann", &["@ann", "@me"])).unwrap();
        assert_eq!(s.notifications().len(), 1);

        s.set_private_recipients(ids(&["@ann"])).unwrap();
        assert_eq!(keys(&s), vec!["before", "epoch", "beyond", "far"]);
        assert_eq!(s.thread_root(), Some("far"));
        assert_eq!(s.visible_lines().len(), 4);

        let read: Vec<bool> = s
            .messages()
            .into_iter()
            .map(|m| s.is_read(m).unwrap())
            .collect();
        // markers for messages already outside the retention window are skipped
        assert_eq!(read, vec![false, false, true, true]);

        s.enter_public();
        s.push_message(post("p", i64::MIN, "@ann")).unwrap();
        assert_eq!(s.all_messages()[0].key, "p");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut s = session();
        s.set_viewport(80, 16);
        s.push_message(post("p1", now(), "@ann")).unwrap();
        s.push_message(dm("d1", now(), "@bob", &["@bob", "@me"])).unwrap();

        let snapshot = s.snapshot();
        assert_eq!(snapshot.lines, vec!["12:00  post p1".to_string()]);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["mode"], json!("public"));
        assert_eq!(value["notifications"], json!([["@bob"]]));
        assert_eq!(value["scroll"]["atBottom"], json!(true));
        assert!(value["scroll"].get("at_bottom").is_none());
        assert_eq!(value["systemMessage"], json!(null));
    }

    #[test]
    fn test_client_handle_is_opaque() {
        struct Transport {
            name: &'static str,
        }
        let mut s = session();
        assert!(s.client::<Transport>().is_none());
        s.set_client(Transport { name: "gossip" });
        assert_eq!(s.client::<Transport>().map(|c| c.name), Some("gossip"));
        assert!(s.client::<String>().is_none());
    }

    #[test]
    fn test_clear_and_reset_notifications() {
        let mut s = session();
        let t = now();
        s.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        s.push_message(dm("d2", t, "@bob", &["@bob", "@me"])).unwrap();

        s.clear_notification(&ids(&["@me", "@ann"]));
        assert_eq!(s.notifications().len(), 1);

        s.reset_notifications();
        assert!(s.notifications().is_empty());
    }

    #[test]
    fn test_read_state_survives_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..ClientConfig::default()
        };
        let t = now();

        let mut first = Session::open("@me".into(), config.clone()).unwrap();
        first.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        assert_eq!(first.notifications().len(), 1);
        first.set_private_recipients(ids(&["@ann"])).unwrap();
        drop(first);

        let mut second = Session::open("@me".into(), config).unwrap();
        second.push_message(dm("d1", t, "@ann", &["@ann", "@me"])).unwrap();
        assert!(second.notifications().is_empty());
    }
}
