//! Application store: the single owner of canonical client state.
//!
//! Every collection the presentation layer renders lives here. Actions call
//! the remote API, merge responses into the canonical collections, derive
//! notifications, and publish a fresh snapshot to subscribers after each
//! state change. Collaborators are injected at construction; nothing here is
//! global.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::api::ApiClient;
use crate::auth::{IdentityProvider, SessionProfile};
use crate::errors::StoreError;
use crate::models::{
    Answer, CreateAnswerRequest, CreateQuestionRequest, CurrentUser, Notification,
    NotificationKind, Question, SiteStats, Tag, VoteOutcome, VoteRequest,
};
use crate::notifications;
use crate::storage::SavedQuestionsFile;

/// Load state of one data domain.
///
/// Every action settles its domain to `Ready` or `Error` on both arms, so a
/// domain can never be left `Loading` by a failure path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DomainState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl DomainState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DomainState::Loading)
    }
}

/// Per-domain load states.
#[derive(Debug, Clone, Default)]
pub struct LoadStates {
    pub questions: DomainState,
    pub tags: DomainState,
    pub general: DomainState,
    pub user: DomainState,
}

/// Data domains with independent load tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Questions,
    Tags,
    General,
    User,
}

/// The published state: canonical collections plus derived flags.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub questions: Vec<Question>,
    pub tags: Vec<Tag>,
    /// Newest first.
    pub notifications: Vec<Notification>,
    /// Ordered, duplicate-free bookmark ids.
    pub saved_questions: Vec<String>,
    pub current_user: Option<CurrentUser>,
    pub loading: LoadStates,
    /// Shared banner message; read-path failures land here.
    pub error: Option<String>,
}

impl StoreState {
    /// Count of notifications not yet read.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn is_question_saved(&self, question_id: &str) -> bool {
        self.saved_questions.iter().any(|id| id == question_id)
    }
}

type Subscriber = Box<dyn Fn(&StoreState) + Send + Sync>;

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// The store itself. One instance per session, shared behind `Arc`.
pub struct AppStore {
    api: Arc<ApiClient>,
    identity: Arc<dyn IdentityProvider>,
    saved_file: SavedQuestionsFile,
    state: RwLock<StoreState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
    /// Question ids whose view was already counted this session.
    viewed: Mutex<HashSet<String>>,
}

impl AppStore {
    /// Build the store, restore the saved-question set from durable storage,
    /// and take the current session profile. Network loads happen in
    /// [`AppStore::load_initial_data`].
    pub fn new(
        api: Arc<ApiClient>,
        identity: Arc<dyn IdentityProvider>,
        saved_file: SavedQuestionsFile,
    ) -> Self {
        let state = StoreState {
            saved_questions: saved_file.load(),
            current_user: current_user_from(identity.session()),
            ..StoreState::default()
        };

        Self {
            api,
            identity,
            saved_file,
            state: RwLock::new(state),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            viewed: Mutex::new(HashSet::new()),
        }
    }

    // ==================== OBSERVER SURFACE ====================

    /// Register a subscriber; it is called with a fresh snapshot after every
    /// state change.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&StoreState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap()
            .push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().retain(|(sid, _)| *sid != id);
    }

    /// Snapshot of the current published state.
    pub fn snapshot(&self) -> StoreState {
        self.state.read().unwrap().clone()
    }

    /// Apply one mutation under the write lock, then publish.
    fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let result = {
            let mut state = self.state.write().unwrap();
            f(&mut state)
        };
        self.publish();
        result
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let subscribers = self.subscribers.lock().unwrap();
        for (_, subscriber) in subscribers.iter() {
            subscriber(&snapshot);
        }
    }

    fn set_domain(&self, domain: Domain, value: DomainState) {
        self.mutate(|s| *domain_slot(s, domain) = value);
    }

    // ==================== SESSION ====================

    /// Refresh the current-user profile from the identity provider without
    /// touching the network. Reputation starts at 0 until synced from the
    /// backend. The per-session view-count guard resets with the session.
    pub fn sync_session(&self) {
        let user = current_user_from(self.identity.session());
        self.viewed.lock().unwrap().clear();
        self.mutate(|s| s.current_user = user);
    }

    /// Re-read the session and reload questions and tags. Call once at
    /// startup and again on every sign-in/sign-out transition.
    pub async fn handle_session_change(&self) {
        self.sync_session();
        self.load_initial_data().await;
    }

    fn require_signed_in(&self, action: &'static str) -> Result<CurrentUser, StoreError> {
        self.state
            .read()
            .unwrap()
            .current_user
            .clone()
            .ok_or(StoreError::AuthRequired(action))
    }

    // ==================== LOADING ====================

    /// Fetch questions and tags in parallel. Either failure aborts the
    /// operation, surfaces one shared error, and leaves previously loaded
    /// collections untouched.
    pub async fn load_initial_data(&self) {
        self.set_domain(Domain::General, DomainState::Loading);

        match tokio::try_join!(self.api.get_questions(), self.api.get_tags()) {
            Ok((questions, tags)) => {
                self.mutate(|s| {
                    s.questions = questions;
                    s.tags = tags;
                    s.error = None;
                    s.loading.general = DomainState::Ready;
                });
            }
            Err(e) => {
                tracing::error!("Failed to load initial data: {}", e);
                self.mutate(|s| {
                    s.error = Some("Failed to load data. Please try again later.".to_string());
                    s.loading.general = DomainState::Error(e.to_string());
                });
            }
        }
    }

    /// Re-run the initial load on demand.
    pub async fn refresh_data(&self) {
        self.load_initial_data().await;
    }

    // ==================== QUESTIONS ====================

    /// Submit a new question and prepend it to the canonical list.
    ///
    /// Returns the new question's id. Requires a signed-in session; fails
    /// before any network call otherwise.
    pub async fn add_question(
        &self,
        title: &str,
        body: &str,
        tag_names: Vec<String>,
    ) -> Result<String, StoreError> {
        self.require_signed_in("ask questions")?;
        self.set_domain(Domain::Questions, DomainState::Loading);

        // Presentation-layer field names become backend field names here.
        let request = CreateQuestionRequest {
            title: title.to_string(),
            content: body.to_string(),
            tag_names,
        };

        match self.api.create_question(&request).await {
            Ok(question) => {
                let id = question.id.clone();
                self.mutate(|s| {
                    s.questions.insert(0, question);
                    s.error = None;
                    s.loading.questions = DomainState::Ready;
                });
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to create question: {}", e);
                self.mutate(|s| {
                    s.error = Some(e.to_string());
                    s.loading.questions = DomainState::Error(e.to_string());
                });
                Err(e.into())
            }
        }
    }

    /// Fetch one question with its answers, straight from the backend.
    ///
    /// No caching and no merge: detail views always reflect the server.
    /// Failures propagate unchanged.
    pub async fn get_question_details(&self, question_id: &str) -> Result<Question, StoreError> {
        Ok(self.api.get_question(question_id).await?)
    }

    /// Synchronous lookup in the canonical list. `None` on a miss, no error.
    pub fn get_question_by_id(&self, question_id: &str) -> Option<Question> {
        self.state
            .read()
            .unwrap()
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .cloned()
    }

    /// Best-effort view count bump, at most once per question per session.
    ///
    /// The backend counts the view as a side effect of the detail fetch;
    /// failures are logged and never surfaced or retried.
    pub async fn increment_views(&self, question_id: &str) {
        {
            let mut viewed = self.viewed.lock().unwrap();
            if !viewed.insert(question_id.to_string()) {
                return;
            }
        }

        if let Err(e) = self.api.get_question(question_id).await {
            tracing::warn!("Failed to increment views for question {}: {}", question_id, e);
        }
    }

    /// Questions asked by a user, routed to the "mine" endpoint for the
    /// current user. Failures degrade to an empty list.
    pub async fn get_user_questions(&self, user_id: &str) -> Vec<Question> {
        self.set_domain(Domain::User, DomainState::Loading);

        let result = if self.is_current_user(user_id) {
            self.api.my_questions().await
        } else {
            self.api.user_questions(user_id).await
        };

        match result {
            Ok(questions) => {
                self.set_domain(Domain::User, DomainState::Ready);
                questions
            }
            Err(e) => {
                tracing::warn!("Failed to load questions for user {}: {}", user_id, e);
                self.set_domain(Domain::User, DomainState::Error(e.to_string()));
                Vec::new()
            }
        }
    }

    /// Answers written by a user; same routing and degradation as
    /// [`AppStore::get_user_questions`].
    pub async fn get_user_answers(&self, user_id: &str) -> Vec<Answer> {
        self.set_domain(Domain::User, DomainState::Loading);

        let result = if self.is_current_user(user_id) {
            self.api.my_answers().await
        } else {
            self.api.user_answers(user_id).await
        };

        match result {
            Ok(answers) => {
                self.set_domain(Domain::User, DomainState::Ready);
                answers
            }
            Err(e) => {
                tracing::warn!("Failed to load answers for user {}: {}", user_id, e);
                self.set_domain(Domain::User, DomainState::Error(e.to_string()));
                Vec::new()
            }
        }
    }

    /// Full-text search. Failures degrade to an empty list, no banner.
    pub async fn search_questions(&self, query: &str) -> Vec<Question> {
        match self.api.search_questions(query).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("Search failed for {:?}: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Questions carrying a tag. Failures degrade to an empty list.
    pub async fn get_questions_by_tag(&self, tag_name: &str) -> Vec<Question> {
        match self.api.questions_by_tag(tag_name).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("Failed to load questions for tag {}: {}", tag_name, e);
                Vec::new()
            }
        }
    }

    // ==================== ANSWERS ====================

    /// Submit an answer, append it to the target question, and bump the
    /// question's answer count by one. Notifies the question's owner when
    /// someone else answered.
    ///
    /// Returns the new answer's id.
    pub async fn add_answer(&self, question_id: &str, content: &str) -> Result<String, StoreError> {
        let actor = self.require_signed_in("answer questions")?;
        self.set_domain(Domain::Questions, DomainState::Loading);

        let request = CreateAnswerRequest {
            question_id: question_id.to_string(),
            content: content.to_string(),
        };

        match self.api.create_answer(&request).await {
            Ok(answer) => {
                let answer_id = answer.id.clone();
                self.mutate(|s| {
                    // Ownership is read from the question as it stands at
                    // merge time, inside the same critical section as the
                    // mutation.
                    let mut notify_title = None;
                    if let Some(question) = s.questions.iter_mut().find(|q| q.id == question_id) {
                        let owner_id = question.author.id.clone();
                        question.answers.push(answer);
                        question.answer_count += 1;

                        if notifications::should_notify(&actor.id, &owner_id) {
                            notify_title = Some(question.title.clone());
                        }
                    }
                    if let Some(title) = notify_title {
                        push_notification(
                            s,
                            NotificationKind::Answer,
                            notifications::answer_message(&actor.name, &title),
                            question_id,
                        );
                    }
                    s.error = None;
                    s.loading.questions = DomainState::Ready;
                });
                Ok(answer_id)
            }
            Err(e) => {
                tracing::error!("Failed to create answer: {}", e);
                self.mutate(|s| {
                    s.error = Some(e.to_string());
                    s.loading.questions = DomainState::Error(e.to_string());
                });
                Err(e.into())
            }
        }
    }

    /// Accept an answer: marks it accepted and its question solved.
    pub async fn accept_answer(
        &self,
        question_id: &str,
        answer_id: &str,
    ) -> Result<(), StoreError> {
        self.require_signed_in("accept answers")?;

        match self.api.accept_answer(answer_id).await {
            Ok(_) => {
                self.mutate(|s| {
                    if let Some(question) = s.questions.iter_mut().find(|q| q.id == question_id) {
                        question.is_solved = true;
                        if let Some(answer) =
                            question.answers.iter_mut().find(|a| a.id == answer_id)
                        {
                            answer.is_accepted = true;
                        }
                    }
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to accept answer {}: {}", answer_id, e);
                self.mutate(|s| s.error = Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    // ==================== VOTES ====================

    /// Vote on a question. The merged `vote_count` is the server-returned
    /// total, never local arithmetic. An upvote on someone else's question
    /// notifies its owner.
    pub async fn vote_question(
        &self,
        question_id: &str,
        vote_type: i32,
    ) -> Result<VoteOutcome, StoreError> {
        let actor = self.require_signed_in("vote")?;

        let request = VoteRequest {
            question_id: Some(question_id.to_string()),
            answer_id: None,
            vote_type,
        };

        match self.api.cast_vote(&request).await {
            Ok(outcome) => {
                self.mutate(|s| {
                    let mut notify_title = None;
                    if let Some(question) = s.questions.iter_mut().find(|q| q.id == question_id) {
                        question.vote_count = outcome.total_votes;

                        if vote_type > 0
                            && notifications::should_notify(&actor.id, &question.author.id)
                        {
                            notify_title = Some(question.title.clone());
                        }
                    }
                    if let Some(title) = notify_title {
                        push_notification(
                            s,
                            NotificationKind::Vote,
                            notifications::question_vote_message(&actor.name, &title),
                            question_id,
                        );
                    }
                    s.error = None;
                });
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Failed to vote on question: {}", e);
                self.mutate(|s| s.error = Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Vote on an answer. Same merge rule as [`AppStore::vote_question`]; an
    /// upvote on someone else's answer notifies the answer's owner.
    pub async fn vote_answer(
        &self,
        question_id: &str,
        answer_id: &str,
        vote_type: i32,
    ) -> Result<VoteOutcome, StoreError> {
        let actor = self.require_signed_in("vote")?;

        let request = VoteRequest {
            question_id: None,
            answer_id: Some(answer_id.to_string()),
            vote_type,
        };

        match self.api.cast_vote(&request).await {
            Ok(outcome) => {
                self.mutate(|s| {
                    let mut notify_title = None;
                    if let Some(question) = s.questions.iter_mut().find(|q| q.id == question_id) {
                        let title = question.title.clone();
                        let owner_id = question
                            .answers
                            .iter_mut()
                            .find(|a| a.id == answer_id)
                            .map(|answer| {
                                answer.vote_count = outcome.total_votes;
                                answer.author.id.clone()
                            });

                        if let Some(owner_id) = owner_id {
                            if vote_type > 0 && notifications::should_notify(&actor.id, &owner_id)
                            {
                                notify_title = Some(title);
                            }
                        }
                    }
                    if let Some(title) = notify_title {
                        push_notification(
                            s,
                            NotificationKind::Vote,
                            notifications::answer_vote_message(&actor.name, &title),
                            question_id,
                        );
                    }
                    s.error = None;
                });
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Failed to vote on answer: {}", e);
                self.mutate(|s| s.error = Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    // ==================== BOOKMARKS ====================

    /// Flip bookmark membership and persist the set. Purely local, no
    /// network. Returns the new membership state.
    pub fn toggle_save_question(&self, question_id: &str) -> Result<bool, StoreError> {
        self.require_signed_in("save questions")?;

        let (saved, ids) = self.mutate(|s| {
            let saved = match s.saved_questions.iter().position(|id| id == question_id) {
                Some(pos) => {
                    s.saved_questions.remove(pos);
                    false
                }
                None => {
                    s.saved_questions.push(question_id.to_string());
                    true
                }
            };
            (saved, s.saved_questions.clone())
        });

        if let Err(e) = self.saved_file.save(&ids) {
            tracing::warn!("Failed to persist saved questions: {}", e);
        }

        Ok(saved)
    }

    // ==================== TAGS & STATS ====================

    /// Re-fetch the tag collection. On failure the previous tags stay and
    /// the banner is set.
    pub async fn get_all_tags(&self) -> Vec<Tag> {
        self.set_domain(Domain::Tags, DomainState::Loading);

        match self.api.get_tags().await {
            Ok(tags) => {
                self.mutate(|s| {
                    s.tags = tags.clone();
                    s.loading.tags = DomainState::Ready;
                });
                tags
            }
            Err(e) => {
                tracing::warn!("Failed to load tags: {}", e);
                self.mutate(|s| {
                    s.error = Some(e.to_string());
                    s.loading.tags = DomainState::Error(e.to_string());
                });
                Vec::new()
            }
        }
    }

    /// Site-wide stats. `None` on failure, with the banner set.
    pub async fn get_stats(&self) -> Option<SiteStats> {
        match self.api.get_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!("Failed to load stats: {}", e);
                self.mutate(|s| s.error = Some(e.to_string()));
                None
            }
        }
    }

    // ==================== NOTIFICATIONS ====================

    /// Mark one notification read.
    pub fn mark_notification_read(&self, notification_id: i64) {
        self.mutate(|s| {
            if let Some(n) = s
                .notifications
                .iter_mut()
                .find(|n| n.id == notification_id)
            {
                n.read = true;
            }
        });
    }

    /// Mark every notification read.
    pub fn mark_all_notifications_read(&self) {
        self.mutate(|s| {
            for n in &mut s.notifications {
                n.read = true;
            }
        });
    }

    /// Drop all notifications.
    pub fn clear_notifications(&self) {
        self.mutate(|s| s.notifications.clear());
    }

    fn is_current_user(&self, user_id: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .current_user
            .as_ref()
            .is_some_and(|u| u.id == user_id)
    }
}

fn domain_slot(state: &mut StoreState, domain: Domain) -> &mut DomainState {
    match domain {
        Domain::Questions => &mut state.loading.questions,
        Domain::Tags => &mut state.loading.tags,
        Domain::General => &mut state.loading.general,
        Domain::User => &mut state.loading.user,
    }
}

/// Head-insert a notification, keeping the list reverse-chronological and
/// ids unique.
fn push_notification(
    state: &mut StoreState,
    kind: NotificationKind,
    message: String,
    question_id: &str,
) {
    let newest_id = state.notifications.first().map(|n| n.id);
    let notification = notifications::build(kind, message, question_id.to_string(), newest_id);
    state.notifications.insert(0, notification);
}

fn current_user_from(session: Option<SessionProfile>) -> Option<CurrentUser> {
    session.map(|profile| CurrentUser {
        id: profile.id,
        name: profile.name,
        avatar: profile.avatar_url,
        email: profile.email,
        reputation: 0,
        joined_at: profile.joined_at,
        is_active: true,
    })
}
