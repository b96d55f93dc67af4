use std::time::Duration;

use crate::{
    config,
    jamendo::JamendoClient,
    tracks::{NetState, NetworkProbe, SnapshotManager, Store, SyncController, TracksState},
    warning,
};

pub type AppController = SyncController<JamendoClient, NetworkProbe>;

/// Application root: owns the store through the controller and carries the
/// settings the commands need.
pub struct AppContext {
    pub controller: AppController,
    pub page_limit: u32,
    pub debounce: Duration,
}

impl AppContext {
    /// Restores the persisted snapshot into a fresh store, wires the Jamendo
    /// client and the reachability probe, and re-validates the snapshot.
    pub async fn bootstrap(offline: bool) -> crate::Res<Self> {
        let client = JamendoClient::from_env()?;
        if !client.has_client_id() {
            warning!("JAMENDO_CLIENT_ID is not set. Jamendo requests will fail until it is provided.");
        }

        let snapshots = SnapshotManager::from_dir(config::data_dir());
        let state = match snapshots.load().await {
            Ok(state) => state,
            Err(e) => {
                warning!("Ignoring unreadable tracks snapshot. Err: {}", e);
                TracksState::default()
            }
        };

        let probe = if offline {
            NetworkProbe::forced(NetState::offline())
        } else {
            NetworkProbe::for_url(client.base_url(), config::request_timeout())
        };

        let controller = SyncController::new(Store::with_state(state).shared(), client, probe)
            .with_snapshots(snapshots);
        controller.hydrate_from_snapshot().await;

        Ok(Self {
            controller,
            page_limit: config::page_limit(),
            debounce: config::search_debounce(),
        })
    }
}
