//! Tracker worker
//!
//! Single writer: all mutations and valuations run in submission order on
//! one task. Callers submit and move on; reads go through the same queue so
//! they observe every earlier submission.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::{ContainerItem, GoalItem, GroupId, ItemId, ProgressReport};
use crate::repository::Settings;
use crate::valuation::SecondaryContainer;
use super::events::{EventBus, ProgressEvent};
use super::service::{Tracker, TrackerSnapshot};

/// A request queued for the worker
#[derive(Debug)]
pub enum Command {
    Load,
    ObserveWealth {
        primary_count: u64,
        container: Option<SecondaryContainer>,
    },
    ObserveHoldings {
        inventory: Option<Vec<ContainerItem>>,
        bank: Option<SecondaryContainer>,
    },
    AddItem(GoalItem),
    AddItemById(ItemId),
    RemoveItem(ItemId),
    AddGroup(String),
    RenameGroup(GroupId, String),
    RemoveGroup(GroupId),
    MoveItemsToGroup(GroupId, Vec<String>),
    RemoveItemFromGroup(GroupId, ItemId),
    ToggleGroupCollapsed(GroupId),
    Sort { ascending: bool },
    ShiftItem { index: usize, up: bool },
    ShiftItemInGroup { group: GroupId, index: usize, up: bool },
    RefreshPrices,
    UpdateSettings(Settings),
    Snapshot(oneshot::Sender<TrackerSnapshot>),
    Report(oneshot::Sender<ProgressReport>),
}

/// Cloneable submission side of the worker
#[derive(Clone)]
pub struct TrackerHandle {
    sender: mpsc::UnboundedSender<Command>,
    events: EventBus,
}

/// Start the worker task
pub fn spawn_worker(mut tracker: Tracker) -> (TrackerHandle, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let handle = TrackerHandle {
        sender,
        events: tracker.events().clone(),
    };

    let task = tokio::spawn(async move {
        while let Some(command) = receiver.recv().await {
            execute(&mut tracker, command).await;
        }
        log::debug!("Tracker worker stopped");
    });

    (handle, task)
}

async fn execute(tracker: &mut Tracker, command: Command) {
    // Errors are already logged and announced by the tracker
    match command {
        Command::Load => {
            let _ = tracker.load().await;
        }
        Command::ObserveWealth { primary_count, container } => {
            tracker.observe_wealth(primary_count, container.as_ref()).await;
        }
        Command::ObserveHoldings { inventory, bank } => {
            tracker.observe_holdings(inventory.as_deref(), bank.as_ref()).await;
        }
        Command::AddItem(item) => {
            let _ = tracker.add_item(item).await;
        }
        Command::AddItemById(item_id) => {
            let _ = tracker.add_item_by_id(item_id).await;
        }
        Command::RemoveItem(item_id) => {
            let _ = tracker.remove_item(item_id).await;
        }
        Command::AddGroup(name) => {
            let _ = tracker.add_group(&name).await;
        }
        Command::RenameGroup(id, name) => {
            let _ = tracker.rename_group(id, &name).await;
        }
        Command::RemoveGroup(id) => {
            let _ = tracker.remove_group(id).await;
        }
        Command::MoveItemsToGroup(id, names) => {
            let _ = tracker.move_items_to_group(id, &names).await;
        }
        Command::RemoveItemFromGroup(id, item_id) => {
            let _ = tracker.remove_item_from_group(id, item_id).await;
        }
        Command::ToggleGroupCollapsed(id) => {
            let _ = tracker.toggle_group_collapsed(id).await;
        }
        Command::Sort { ascending } => {
            let _ = tracker.sort(ascending).await;
        }
        Command::ShiftItem { index, up } => {
            let _ = tracker.shift_item(index, up).await;
        }
        Command::ShiftItemInGroup { group, index, up } => {
            let _ = tracker.shift_item_in_group(group, index, up).await;
        }
        Command::RefreshPrices => {
            tracker.refresh_prices();
        }
        Command::UpdateSettings(settings) => {
            if let Err(e) = tracker.update_settings(settings).await {
                log::error!("Failed to save settings: {}", e);
            }
        }
        Command::Snapshot(reply) => {
            let _ = reply.send(tracker.snapshot());
        }
        Command::Report(reply) => {
            let _ = reply.send(tracker.report());
        }
    }
}

impl TrackerHandle {
    /// Queue a command. Returns false once the worker has stopped.
    pub fn submit(&self, command: Command) -> bool {
        if self.sender.send(command).is_err() {
            log::warn!("Tracker worker is gone, dropping command");
            return false;
        }
        true
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn load(&self) -> bool {
        self.submit(Command::Load)
    }

    pub fn observe_wealth(&self, primary_count: u64, container: Option<SecondaryContainer>) -> bool {
        self.submit(Command::ObserveWealth { primary_count, container })
    }

    pub fn observe_holdings(&self, inventory: Option<Vec<ContainerItem>>, bank: Option<SecondaryContainer>) -> bool {
        self.submit(Command::ObserveHoldings { inventory, bank })
    }

    pub fn add_item(&self, item: GoalItem) -> bool {
        self.submit(Command::AddItem(item))
    }

    pub fn add_item_by_id(&self, item_id: ItemId) -> bool {
        self.submit(Command::AddItemById(item_id))
    }

    pub fn remove_item(&self, item_id: ItemId) -> bool {
        self.submit(Command::RemoveItem(item_id))
    }

    pub fn add_group(&self, name: impl Into<String>) -> bool {
        self.submit(Command::AddGroup(name.into()))
    }

    pub fn rename_group(&self, id: GroupId, name: impl Into<String>) -> bool {
        self.submit(Command::RenameGroup(id, name.into()))
    }

    pub fn remove_group(&self, id: GroupId) -> bool {
        self.submit(Command::RemoveGroup(id))
    }

    pub fn move_items_to_group(&self, id: GroupId, names: Vec<String>) -> bool {
        self.submit(Command::MoveItemsToGroup(id, names))
    }

    pub fn remove_item_from_group(&self, id: GroupId, item_id: ItemId) -> bool {
        self.submit(Command::RemoveItemFromGroup(id, item_id))
    }

    pub fn toggle_group_collapsed(&self, id: GroupId) -> bool {
        self.submit(Command::ToggleGroupCollapsed(id))
    }

    pub fn sort(&self, ascending: bool) -> bool {
        self.submit(Command::Sort { ascending })
    }

    pub fn shift_item(&self, index: usize, up: bool) -> bool {
        self.submit(Command::ShiftItem { index, up })
    }

    pub fn shift_item_in_group(&self, group: GroupId, index: usize, up: bool) -> bool {
        self.submit(Command::ShiftItemInGroup { group, index, up })
    }

    pub fn refresh_prices(&self) -> bool {
        self.submit(Command::RefreshPrices)
    }

    pub fn update_settings(&self, settings: Settings) -> bool {
        self.submit(Command::UpdateSettings(settings))
    }

    /// State after every previously submitted command has run
    pub async fn snapshot(&self) -> Option<TrackerSnapshot> {
        let (reply, response) = oneshot::channel();
        if !self.submit(Command::Snapshot(reply)) {
            return None;
        }
        response.await.ok()
    }

    pub async fn report(&self) -> Option<ProgressReport> {
        let (reply, response) = oneshot::channel();
        if !self.submit(Command::Report(reply)) {
            return None;
        }
        response.await.ok()
    }
}
