//! In-memory notification platform with a simulated clock.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use notify_host::{NotificationRequest, PermissionState};

use super::{NotificationPlatform, PlatformCallback, PlatformFuture};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Notification created on a [`SimulatedNotificationPlatform`].
pub struct SimulatedNotification {
    /// Creation-order id, also used as the handle.
    pub id: usize,
    /// Title passed at creation.
    pub title: String,
    /// Body passed at creation.
    pub body: String,
    /// Tag passed at creation.
    pub tag: String,
    /// Simulated time the notification closed at, if it has.
    pub closed_at_ms: Option<u64>,
}

impl SimulatedNotification {
    /// Returns `true` while the notification is still visible.
    pub fn is_open(&self) -> bool {
        self.closed_at_ms.is_none()
    }
}

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    callback: PlatformCallback,
}

struct SimulatedState {
    supported: bool,
    permission: PermissionState,
    prompt_answer: Result<PermissionState, String>,
    prompt_count: usize,
    create_failure: Option<String>,
    timer_failure: Option<String>,
    now_ms: u64,
    timer_seq: u64,
    notifications: Vec<SimulatedNotification>,
    timers: Vec<PendingTimer>,
    click_handlers: HashMap<usize, PlatformCallback>,
    focus_count: usize,
}

#[derive(Clone)]
/// Deterministic stand-in for the browser Notification API.
///
/// Clones share state, so a test can keep one clone while an adapter owns another.
pub struct SimulatedNotificationPlatform {
    inner: Rc<RefCell<SimulatedState>>,
}

impl std::fmt::Debug for SimulatedNotificationPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("SimulatedNotificationPlatform")
            .field("supported", &state.supported)
            .field("permission", &state.permission)
            .field("now_ms", &state.now_ms)
            .field("notifications", &state.notifications)
            .finish()
    }
}

impl SimulatedNotificationPlatform {
    /// Builds a supporting platform with `permission` recorded.
    ///
    /// The prompt answers [`PermissionState::Granted`] unless overridden.
    pub fn new(permission: PermissionState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SimulatedState {
                supported: true,
                permission,
                prompt_answer: Ok(PermissionState::Granted),
                prompt_count: 0,
                create_failure: None,
                timer_failure: None,
                now_ms: 0,
                timer_seq: 0,
                notifications: Vec::new(),
                timers: Vec::new(),
                click_handlers: HashMap::new(),
                focus_count: 0,
            })),
        }
    }

    /// Builds a platform with no Notification API.
    pub fn unsupported() -> Self {
        let platform = Self::new(PermissionState::Unsupported);
        platform.inner.borrow_mut().supported = false;
        platform
    }

    /// Sets what the next prompts answer.
    pub fn set_prompt_answer(&self, answer: Result<PermissionState, String>) {
        self.inner.borrow_mut().prompt_answer = answer;
    }

    /// Makes the next `set_timeout` call fail with `message`.
    pub fn fail_next_timer(&self, message: &str) {
        self.inner.borrow_mut().timer_failure = Some(message.to_string());
    }

    /// Makes the next `create` call fail with `message`.
    pub fn fail_next_create(&self, message: &str) {
        self.inner.borrow_mut().create_failure = Some(message.to_string());
    }

    /// Returns how many times the permission prompt was shown.
    pub fn prompt_count(&self) -> usize {
        self.inner.borrow().prompt_count
    }

    /// Returns how many times the page was focused.
    pub fn focus_count(&self) -> usize {
        self.inner.borrow().focus_count
    }

    /// Returns the current simulated time.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Returns every notification created so far.
    pub fn notifications(&self) -> Vec<SimulatedNotification> {
        self.inner.borrow().notifications.clone()
    }

    /// Returns the notifications still visible.
    pub fn open_notifications(&self) -> Vec<SimulatedNotification> {
        self.inner
            .borrow()
            .notifications
            .iter()
            .filter(|n| n.is_open())
            .cloned()
            .collect()
    }

    /// Advances the clock, firing due timers in deadline order.
    pub fn advance_ms(&self, delta_ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(delta_ms);
        loop {
            let next = {
                let mut state = self.inner.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = state.timers.remove(index);
                    state.now_ms = state.now_ms.max(timer.due_ms);
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }

    /// Simulates a user click on notification `id`.
    pub fn click(&self, id: usize) {
        let handler = self.inner.borrow_mut().click_handlers.remove(&id);
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl NotificationPlatform for SimulatedNotificationPlatform {
    type Handle = usize;

    fn is_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    fn permission(&self) -> PermissionState {
        self.inner.borrow().permission
    }

    fn prompt_permission<'a>(&'a self) -> PlatformFuture<'a, Result<PermissionState, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.prompt_count += 1;
            let answer = state.prompt_answer.clone();
            if let Ok(permission) = &answer {
                state.permission = *permission;
            }
            answer
        })
    }

    fn create(&self, request: &NotificationRequest, tag: &str) -> Result<Self::Handle, String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.create_failure.take() {
            return Err(message);
        }
        let now = state.now_ms;
        // Same-tag notifications replace the visible one.
        let mut replaced = Vec::new();
        for existing in state
            .notifications
            .iter_mut()
            .filter(|n| n.is_open() && n.tag == tag)
        {
            existing.closed_at_ms = Some(now);
            replaced.push(existing.id);
        }
        for id in replaced {
            state.click_handlers.remove(&id);
        }
        let id = state.notifications.len();
        state.notifications.push(SimulatedNotification {
            id,
            title: request.title.clone(),
            body: request.body.clone(),
            tag: tag.to_string(),
            closed_at_ms: None,
        });
        Ok(id)
    }

    fn close(&self, handle: &Self::Handle) {
        let mut state = self.inner.borrow_mut();
        let now = state.now_ms;
        if let Some(notification) = state.notifications.get_mut(*handle) {
            if notification.closed_at_ms.is_none() {
                notification.closed_at_ms = Some(now);
            }
        }
        state.click_handlers.remove(handle);
    }

    fn set_timeout(&self, delay_ms: u32, callback: PlatformCallback) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.timer_failure.take() {
            return Err(message);
        }
        let due_ms = state.now_ms.saturating_add(u64::from(delay_ms));
        let seq = state.timer_seq;
        state.timer_seq += 1;
        state.timers.push(PendingTimer {
            due_ms,
            seq,
            callback,
        });
        Ok(())
    }

    fn on_click(&self, handle: &Self::Handle, callback: PlatformCallback) {
        self.inner
            .borrow_mut()
            .click_handlers
            .insert(*handle, callback);
    }

    fn focus_window(&self) {
        self.inner.borrow_mut().focus_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn timers_fire_in_deadline_order_once_due() {
        let platform = SimulatedNotificationPlatform::new(PermissionState::Granted);
        let fired = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "late"), (100, "early")] {
            let fired = Rc::clone(&fired);
            platform
                .set_timeout(delay, Box::new(move || fired.borrow_mut().push(label)))
                .expect("schedule");
        }

        platform.advance_ms(99);
        assert!(fired.borrow().is_empty());
        platform.advance_ms(201);
        assert_eq!(*fired.borrow(), vec!["early", "late"]);
        assert_eq!(platform.now_ms(), 300);
    }

    #[test]
    fn closing_drops_click_handler() {
        let platform = SimulatedNotificationPlatform::new(PermissionState::Granted);
        let handle = platform
            .create(&NotificationRequest::new("T", "B"), "tag")
            .expect("create");
        let clicked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&clicked);
        platform.on_click(&handle, Box::new(move || flag.set(true)));

        platform.close(&handle);
        platform.click(handle);
        assert!(!clicked.get());
    }

    #[test]
    fn same_tag_replaces_open_notification() {
        let platform = SimulatedNotificationPlatform::new(PermissionState::Granted);
        platform
            .create(&NotificationRequest::new("first", ""), "tag")
            .expect("create");
        platform
            .create(&NotificationRequest::new("other tag", ""), "elsewhere")
            .expect("create");
        platform
            .create(&NotificationRequest::new("second", ""), "tag")
            .expect("create");

        let open: Vec<String> = platform
            .open_notifications()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(open, vec!["other tag".to_string(), "second".to_string()]);
    }

    #[test]
    fn prompt_records_answer_as_permission() {
        let platform = SimulatedNotificationPlatform::new(PermissionState::Default);
        platform.set_prompt_answer(Ok(PermissionState::Denied));
        let answer = futures::executor::block_on(platform.prompt_permission());
        assert_eq!(answer, Ok(PermissionState::Denied));
        assert_eq!(platform.permission(), PermissionState::Denied);
        assert_eq!(platform.prompt_count(), 1);
    }
}
