//=========================================================================
// Command Queue
//=========================================================================
//
// Deferred panel commands.
//
// Panel hooks never receive the manager itself. A hook that wants to
// open, close or refocus a panel queues a command here instead; the
// manager applies queued commands at the tick boundary, after the
// mutation that triggered the hook has fully completed.
//
// Architecture:
//   Panel hook → CommandSender::close() → channel → CommandQueue::next()
//                                                        ↓
//                                     UiManager::process_commands()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PanelKey;

//=== PanelCommand ========================================================

/// A stack operation requested from inside a panel hook.
pub enum PanelCommand<K: PanelKey> {
    /// Open (or refocus) a panel in the named group.
    Open {
        key: K,
        group: String,
        user_data: Option<Box<dyn Any>>,
    },

    /// Close a stacked panel.
    Close(K),

    /// Move a stacked panel to the top of its group.
    Refocus {
        key: K,
        user_data: Option<Box<dyn Any>>,
    },

    /// Close every stacked panel.
    CloseAll,
}

impl<K: PanelKey> fmt::Debug for PanelCommand<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { key, group, user_data } => f
                .debug_struct("Open")
                .field("key", key)
                .field("group", group)
                .field("has_user_data", &user_data.is_some())
                .finish(),
            Self::Close(key) => f.debug_tuple("Close").field(key).finish(),
            Self::Refocus { key, user_data } => f
                .debug_struct("Refocus")
                .field("key", key)
                .field("has_user_data", &user_data.is_some())
                .finish(),
            Self::CloseAll => f.write_str("CloseAll"),
        }
    }
}

//=== CommandSender =======================================================

/// Cloneable handle for queuing panel commands.
///
/// Handed to every hook through [`super::PanelContext`]. Panels may keep a
/// clone (e.g. for a close button) and use it between hooks.
pub struct CommandSender<K: PanelKey> {
    sender: Sender<PanelCommand<K>>,
}

impl<K: PanelKey> Clone for CommandSender<K> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<K: PanelKey> CommandSender<K> {
    /// Queues an open request.
    pub fn open(&self, key: K, group: impl Into<String>, user_data: Option<Box<dyn Any>>) {
        self.send(PanelCommand::Open {
            key,
            group: group.into(),
            user_data,
        });
    }

    /// Queues a close request.
    pub fn close(&self, key: K) {
        self.send(PanelCommand::Close(key));
    }

    /// Queues a refocus request.
    pub fn refocus(&self, key: K, user_data: Option<Box<dyn Any>>) {
        self.send(PanelCommand::Refocus { key, user_data });
    }

    /// Queues a request to close every stacked panel.
    pub fn close_all(&self) {
        self.send(PanelCommand::CloseAll);
    }

    /// Queues an arbitrary command.
    ///
    /// Commands sent after the owning manager is dropped are discarded
    /// with a warning.
    pub fn send(&self, command: PanelCommand<K>) {
        if let Err(e) = self.sender.send(command) {
            warn!("Panel command {:?} dropped, manager is gone", e.into_inner());
        }
    }
}

//=== CommandQueue ========================================================

/// Receiving side of the command channel, owned by the manager.
pub(crate) struct CommandQueue<K: PanelKey> {
    sender: CommandSender<K>,
    receiver: Receiver<PanelCommand<K>>,
}

impl<K: PanelKey> CommandQueue<K> {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender: CommandSender { sender },
            receiver,
        }
    }

    /// Sender shared with panel hooks.
    pub(crate) fn sender(&self) -> &CommandSender<K> {
        &self.sender
    }

    /// Pops the oldest queued command, if any.
    ///
    /// The queue holds its own sender, so it never reports disconnection.
    pub(crate) fn next(&self) -> Option<PanelCommand<K>> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of commands waiting.
    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Discards every queued command, returning how many were dropped.
    pub(crate) fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestPanel {
        Menu,
        Dialog,
    }

    impl PanelKey for TestPanel {}

    #[test]
    fn commands_are_delivered_in_fifo_order() {
        let queue = CommandQueue::<TestPanel>::new();
        let sender = queue.sender().clone();

        sender.open(TestPanel::Menu, "Default", None);
        sender.close(TestPanel::Dialog);
        sender.close_all();

        assert_eq!(queue.len(), 3);
        assert!(matches!(queue.next(), Some(PanelCommand::Open { key: TestPanel::Menu, .. })));
        assert!(matches!(queue.next(), Some(PanelCommand::Close(TestPanel::Dialog))));
        assert!(matches!(queue.next(), Some(PanelCommand::CloseAll)));
        assert!(queue.next().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn user_data_travels_with_the_command() {
        let queue = CommandQueue::<TestPanel>::new();
        queue.sender().refocus(TestPanel::Menu, Some(Box::new(7_u32)));

        match queue.next() {
            Some(PanelCommand::Refocus { key, user_data }) => {
                assert_eq!(key, TestPanel::Menu);
                let value = user_data.and_then(|d| d.downcast::<u32>().ok());
                assert_eq!(value.map(|v| *v), Some(7));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn clear_drops_pending_commands() {
        let queue = CommandQueue::<TestPanel>::new();
        queue.sender().close(TestPanel::Menu);
        queue.sender().close(TestPanel::Dialog);

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn sending_after_queue_dropped_does_not_panic() {
        let queue = CommandQueue::<TestPanel>::new();
        let sender = queue.sender().clone();
        drop(queue);

        sender.close(TestPanel::Menu);
    }

    #[test]
    fn debug_hides_user_data_payload() {
        let command = PanelCommand::Open {
            key: TestPanel::Dialog,
            group: "Popup".to_string(),
            user_data: Some(Box::new("secret")),
        };

        let text = format!("{:?}", command);
        assert!(text.contains("Dialog"));
        assert!(text.contains("has_user_data: true"));
    }
}
