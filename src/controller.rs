//! The list controller: owns the authoritative transaction collection and
//! reconciles it against the remote source.
//!
//! The controller is a plain state machine. Remote operations are split
//! into a `begin_*` phase that mutates local state optimistically and hands
//! back a ticket, and a `finish_*` phase that applies the remote outcome.
//! Tickets carry generation counters so completions that arrive after the
//! state they were based on has been superseded are ignored instead of
//! clobbering newer data. The async [ListController::refresh] and
//! [ListController::delete] wrappers drive both phases for the common case.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::{
    Error,
    expansion::ExpansionState,
    source::{AuthToken, TransactionSource},
    transaction::{SortKey, TimeWindow, Transaction, TransactionId, sort_transactions},
};

/// Where the list is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListState {
    /// No fetch has been started yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; the previous collection is still shown.
    Error,
}

/// A user gesture, translated into an explicit command for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The screen gained focus, or the user asked for fresh data.
    Refresh,
    /// The user confirmed deleting a record.
    RequestDelete(TransactionId),
    /// The user swiped to edit a record.
    RequestEdit(TransactionId),
    /// The user tapped a record card to expand or collapse it.
    ToggleExpand(TransactionId),
    /// The user picked a time window in the filter sheet.
    SetWindow(TimeWindow),
    /// The user picked a sort order in the filter sheet.
    SetSort(SortKey),
    /// The user reset the filter sheet to its defaults.
    ResetFilters,
}

/// Which editor screen a record should be edited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRoute {
    /// The income editor.
    Income,
    /// The expense editor.
    Expense,
}

/// The remote work a command asks the shell to perform.
///
/// Local-only commands complete synchronously and produce no action.
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Fetch the full transaction set, then call
    /// [ListController::finish_refresh] with the ticket and the result.
    Fetch(FetchTicket),
    /// Issue the remote delete for [DeleteTicket::id], then call
    /// [ListController::finish_delete] with the ticket and the result.
    Delete(DeleteTicket),
    /// Open the editor for the given record.
    OpenEditor {
        /// Which editor to open.
        route: EditorRoute,
        /// The record to edit.
        id: TransactionId,
    },
}

/// Identifies one refresh cycle. A completion carrying an out-of-date
/// ticket is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// The record removed by an optimistic delete, kept so it can be restored
/// if the remote delete fails.
#[derive(Debug, PartialEq)]
pub struct DeleteTicket {
    record: Transaction,
    index: usize,
    collection_generation: u64,
}

impl DeleteTicket {
    /// The ID of the record being deleted.
    pub fn id(&self) -> TransactionId {
        self.record.id
    }
}

/// Owns the authoritative transaction collection for one list screen and
/// projects it into the filtered, sorted view.
///
/// Created when the screen mounts and dropped when it unmounts. The
/// collection is only ever mutated through the controller; the view reads
/// it back through [ListController::view], which is recomputed from scratch
/// on every call.
#[derive(Debug)]
pub struct ListController {
    token: AuthToken,
    transactions: Vec<Transaction>,
    expansion: ExpansionState,
    window: TimeWindow,
    sort: SortKey,
    state: ListState,
    /// Bumped by every `begin_refresh`; completions for older generations
    /// are stale.
    fetch_generation: u64,
    /// Bumped whenever the collection is replaced wholesale. A delete
    /// ticket from an older collection must not restore its record.
    collection_generation: u64,
}

impl ListController {
    /// Create a controller for the user identified by `token`, with an
    /// empty collection and the default filter and sort.
    pub fn new(token: AuthToken) -> Self {
        Self {
            token,
            transactions: Vec::new(),
            expansion: ExpansionState::new(),
            window: TimeWindow::default_preset(),
            sort: SortKey::default_preset(),
            state: ListState::Idle,
            fetch_generation: 0,
            collection_generation: 0,
        }
    }

    /// Where the list is in its fetch lifecycle.
    pub fn state(&self) -> ListState {
        self.state
    }

    /// The authoritative collection, in the order the server returned it.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The currently selected time window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// The currently selected sort order.
    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// The filtered and sorted projection of the collection, measured from
    /// the current wall-clock time.
    pub fn view(&self) -> Vec<&Transaction> {
        self.view_at(OffsetDateTime::now_utc())
    }

    /// The filtered and sorted projection of the collection, measured from
    /// `now`.
    ///
    /// This is a pure recomputation: calling it twice with the same
    /// collection, filter, sort, and `now` yields identical output.
    pub fn view_at(&self, now: OffsetDateTime) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|transaction| self.window.contains(transaction, now))
            .collect();
        sort_transactions(&mut rows, self.sort);

        rows
    }

    /// Select the time window used to filter the view.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
    }

    /// Select the order the view is sorted in.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Restore the default time window and sort order.
    pub fn reset_filters(&mut self) {
        self.window = TimeWindow::default_preset();
        self.sort = SortKey::default_preset();
    }

    /// Flip whether the record with `id` shows its expanded details.
    pub fn toggle_expanded(&mut self, id: TransactionId) {
        self.expansion.toggle(id);
    }

    /// Whether the record with `id` shows its expanded details.
    pub fn is_expanded(&self, id: TransactionId) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Dispatch a command, returning the remote work the shell must perform
    /// to complete it, if any.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if a delete is requested
    /// for a record the collection does not contain.
    pub fn handle(&mut self, command: Command) -> Result<Option<Action>, Error> {
        match command {
            Command::Refresh => Ok(Some(Action::Fetch(self.begin_refresh()))),
            Command::RequestDelete(id) => {
                let ticket = self.begin_delete(id)?;
                Ok(Some(Action::Delete(ticket)))
            }
            Command::RequestEdit(id) => Ok(self
                .editor_for(id)
                .map(|route| Action::OpenEditor { route, id })),
            Command::ToggleExpand(id) => {
                self.toggle_expanded(id);
                Ok(None)
            }
            Command::SetWindow(window) => {
                self.set_window(window);
                Ok(None)
            }
            Command::SetSort(sort) => {
                self.set_sort(sort);
                Ok(None)
            }
            Command::ResetFilters => {
                self.reset_filters();
                Ok(None)
            }
        }
    }

    /// Enter `Loading` and start a new refresh cycle.
    ///
    /// Every focus event calls this, not just the first, so the list picks
    /// up records created or edited on other screens. Starting a new cycle
    /// supersedes any fetch still in flight: last response wins.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.state = ListState::Loading;
        self.fetch_generation += 1;

        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    /// Apply the outcome of the fetch started by `ticket`.
    ///
    /// A successful fetch replaces the collection wholesale; the server is
    /// the source of truth, so no merging with local state happens. A
    /// failed fetch leaves the collection untouched and enters `Error`.
    /// Stale completions (a newer refresh has started since) are dropped.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] when the fetch result is an error.
    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Transaction>, Error>,
    ) -> Result<(), Error> {
        if ticket.generation != self.fetch_generation {
            tracing::warn!(
                "ignoring stale fetch completion (generation {}, current {})",
                ticket.generation,
                self.fetch_generation
            );
            return Ok(());
        }

        match result {
            Ok(transactions) => {
                self.transactions = dedupe_by_id(transactions);
                self.collection_generation += 1;
                self.state = ListState::Ready;
                Ok(())
            }
            Err(error) => {
                tracing::error!("could not refresh transactions: {error}");
                self.state = ListState::Error;
                Err(Error::FetchFailed(error.to_string()))
            }
        }
    }

    /// Optimistically remove the record with `id` from the collection and
    /// return the ticket needed to finish the delete.
    ///
    /// The view stops showing the record as soon as this returns, before
    /// the network call resolves.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if `id` is not in the
    /// collection.
    pub fn begin_delete(&mut self, id: TransactionId) -> Result<DeleteTicket, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or(Error::DeleteMissingTransaction)?;
        let record = self.transactions.remove(index);

        Ok(DeleteTicket {
            record,
            index,
            collection_generation: self.collection_generation,
        })
    }

    /// Apply the outcome of the remote delete started by `ticket`.
    ///
    /// On failure the removed record is restored to its original position,
    /// unless a refresh replaced the collection while the delete was in
    /// flight; the fresh server state already reflects the truth, and
    /// restoring into it would resurrect the record.
    ///
    /// # Errors
    /// Returns [Error::DeleteFailed] when the remote delete failed, whether
    /// or not the record was restored.
    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), Error>,
    ) -> Result<(), Error> {
        let Err(error) = result else {
            return Ok(());
        };

        let id = ticket.record.id;
        tracing::error!("could not delete transaction {id}: {error}");

        if ticket.collection_generation == self.collection_generation {
            let index = ticket.index.min(self.transactions.len());
            self.transactions.insert(index, ticket.record);
        } else {
            tracing::warn!(
                "not restoring transaction {id}: the collection was refreshed while the delete was in flight"
            );
        }

        Err(Error::DeleteFailed {
            id,
            reason: error.to_string(),
        })
    }

    /// Which editor the record with `id` should be edited in, or `None` if
    /// the collection does not contain it.
    pub fn editor_for(&self, id: TransactionId) -> Option<EditorRoute> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
            .map(|transaction| {
                if transaction.category.is_income() {
                    EditorRoute::Income
                } else {
                    EditorRoute::Expense
                }
            })
    }

    /// Merge a record the editor saved back into the collection.
    ///
    /// Matching is by ID, last write wins. A record the collection does not
    /// contain yet (freshly created on the server) is appended.
    pub fn apply_edited(&mut self, record: Transaction) {
        match self
            .transactions
            .iter()
            .position(|transaction| transaction.id == record.id)
        {
            Some(index) => self.transactions[index] = record,
            None => self.transactions.push(record),
        }
    }

    /// Fetch the full transaction set from `source` and reconcile it,
    /// driving both phases of the refresh.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] when the remote fetch fails.
    pub async fn refresh<S>(&mut self, source: &S) -> Result<(), Error>
    where
        S: TransactionSource + ?Sized,
    {
        let ticket = self.begin_refresh();
        let result = source.fetch_all(&self.token).await;

        self.finish_refresh(ticket, result)
    }

    /// Delete the record with `id`, optimistically locally and then on
    /// `source`, driving both phases of the delete.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if `id` is not in the
    /// collection, or [Error::DeleteFailed] when the remote delete fails
    /// (the record is restored first).
    pub async fn delete<S>(&mut self, source: &S, id: TransactionId) -> Result<(), Error>
    where
        S: TransactionSource + ?Sized,
    {
        let ticket = self.begin_delete(id)?;
        let result = source.delete_one(id, &self.token).await;

        self.finish_delete(ticket, result)
    }
}

/// Drop records whose ID already appeared earlier in the batch, keeping the
/// first occurrence. IDs are unique on the server, so duplicates mean the
/// response is damaged; the collection invariant holds either way.
fn dedupe_by_id(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        if seen.insert(transaction.id) {
            deduped.push(transaction);
        } else {
            tracing::warn!("dropping duplicate transaction record {}", transaction.id);
        }
    }

    deduped
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use time::macros::datetime;

    use crate::{
        Error,
        source::{AuthToken, TransactionSource},
        transaction::{
            Category, SortKey, TimeWindow, Timestamp, Transaction, TransactionDraft, TransactionId,
        },
    };

    use super::{Action, Command, EditorRoute, ListController, ListState};

    fn transaction(id: TransactionId, amount: f64, created_at: &str) -> Transaction {
        Transaction {
            id,
            owner_id: 1,
            title: format!("transaction #{id}"),
            description: String::new(),
            category: Category::Expense("Test".to_owned()),
            amount,
            currency: "NZD".to_owned(),
            receipt_image_url: None,
            created_at: Timestamp::new(created_at),
            updated_at: Timestamp::new(created_at),
        }
    }

    fn income(id: TransactionId, amount: f64, created_at: &str) -> Transaction {
        Transaction {
            category: Category::Income,
            ..transaction(id, amount, created_at)
        }
    }

    /// A controller pre-seeded with `transactions` via a completed refresh.
    fn seeded_controller(transactions: Vec<Transaction>) -> ListController {
        let mut controller = ListController::new(AuthToken::new("test-token"));
        let ticket = controller.begin_refresh();
        controller
            .finish_refresh(ticket, Ok(transactions))
            .expect("Could not seed controller");

        controller
    }

    fn view_ids(controller: &ListController) -> Vec<TransactionId> {
        controller
            .view_at(datetime!(2024-06-10 12:00:00 UTC))
            .iter()
            .map(|transaction| transaction.id)
            .collect()
    }

    struct StubSource {
        transactions: Vec<Transaction>,
        fail_fetch: bool,
        fail_delete: bool,
    }

    #[async_trait]
    impl TransactionSource for StubSource {
        async fn fetch_all(&self, _: &AuthToken) -> Result<Vec<Transaction>, Error> {
            if self.fail_fetch {
                Err(Error::ServerError(500))
            } else {
                Ok(self.transactions.clone())
            }
        }

        async fn delete_one(&self, _: TransactionId, _: &AuthToken) -> Result<(), Error> {
            if self.fail_delete {
                Err(Error::ServerError(500))
            } else {
                Ok(())
            }
        }

        async fn create_or_update(
            &self,
            _: &TransactionDraft,
            _: &AuthToken,
        ) -> Result<Transaction, Error> {
            unimplemented!("not used by the list controller tests")
        }
    }

    #[test]
    fn refresh_replaces_collection_and_enters_ready() {
        let mut controller = ListController::new(AuthToken::new("test-token"));
        assert_eq!(controller.state(), ListState::Idle);

        let ticket = controller.begin_refresh();
        assert_eq!(controller.state(), ListState::Loading);

        let fetched = vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ];
        controller
            .finish_refresh(ticket, Ok(fetched.clone()))
            .expect("Could not finish refresh");

        assert_eq!(controller.state(), ListState::Ready);
        assert_eq!(controller.transactions(), fetched.as_slice());
    }

    #[test]
    fn failed_refresh_preserves_collection_and_enters_error() {
        let mut controller = seeded_controller(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]);

        let ticket = controller.begin_refresh();
        let got = controller.finish_refresh(ticket, Err(Error::ServerError(500)));

        assert!(
            matches!(&got, Err(Error::FetchFailed(_))),
            "want FetchFailed, got {got:?}"
        );
        assert_eq!(controller.state(), ListState::Error);
        assert_eq!(controller.transactions().len(), 1);
    }

    #[test]
    fn every_focus_event_reenters_loading() {
        let mut controller = seeded_controller(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]);
        assert_eq!(controller.state(), ListState::Ready);

        controller.begin_refresh();

        assert_eq!(controller.state(), ListState::Loading);
    }

    #[test]
    fn stale_fetch_completion_is_ignored() {
        let mut controller = ListController::new(AuthToken::new("test-token"));

        let stale = controller.begin_refresh();
        let current = controller.begin_refresh();

        controller
            .finish_refresh(stale, Ok(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]))
            .expect("Stale completion should be dropped without error");
        assert_eq!(controller.state(), ListState::Loading);
        assert!(controller.transactions().is_empty());

        controller
            .finish_refresh(
                current,
                Ok(vec![transaction(2, 20.0, "2024-06-08T00:00:00Z")]),
            )
            .expect("Could not finish refresh");
        assert_eq!(controller.state(), ListState::Ready);
        assert_eq!(view_ids(&controller), [2]);
    }

    #[test]
    fn refresh_drops_duplicate_ids() {
        let mut controller = ListController::new(AuthToken::new("test-token"));

        let ticket = controller.begin_refresh();
        controller
            .finish_refresh(
                ticket,
                Ok(vec![
                    transaction(1, 10.0, "2024-06-09T00:00:00Z"),
                    transaction(1, 99.0, "2024-06-08T00:00:00Z"),
                    transaction(2, 20.0, "2024-06-07T00:00:00Z"),
                ]),
            )
            .expect("Could not finish refresh");

        let got = controller.transactions();
        assert_eq!(got.len(), 2, "want duplicate dropped, got {got:?}");
        assert_eq!(got[0].amount, 10.0, "want the first occurrence kept");
    }

    #[test]
    fn delete_removes_record_before_the_network_call_resolves() {
        let mut controller = seeded_controller(vec![
            transaction(5, 10.0, "2024-06-09T00:00:00Z"),
            transaction(7, 50.0, "2024-06-08T00:00:00Z"),
        ]);

        controller.begin_delete(7).expect("Could not begin delete");

        assert_eq!(view_ids(&controller), [5]);
    }

    #[test]
    fn failed_delete_restores_record_at_original_position() {
        let mut controller = seeded_controller(vec![
            transaction(5, 10.0, "2024-06-09T00:00:00Z"),
            transaction(7, 50.0, "2024-06-08T00:00:00Z"),
            transaction(9, 30.0, "2024-06-07T00:00:00Z"),
        ]);

        let ticket = controller.begin_delete(7).expect("Could not begin delete");
        assert_eq!(view_ids(&controller), [5, 9]);

        let got = controller.finish_delete(ticket, Err(Error::ServerError(500)));

        assert_eq!(
            got,
            Err(Error::DeleteFailed {
                id: 7,
                reason: Error::ServerError(500).to_string(),
            })
        );
        assert_eq!(view_ids(&controller), [5, 7, 9]);
    }

    #[test]
    fn deleting_a_missing_record_errors() {
        let mut controller = seeded_controller(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]);

        let got = controller.begin_delete(42);

        assert!(matches!(got, Err(Error::DeleteMissingTransaction)));
    }

    #[test]
    fn deleted_record_stays_absent_after_refresh() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ]);

        let delete = controller.begin_delete(2).expect("Could not begin delete");
        controller
            .finish_delete(delete, Ok(()))
            .expect("Could not finish delete");

        let refresh = controller.begin_refresh();
        controller
            .finish_refresh(refresh, Ok(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]))
            .expect("Could not finish refresh");

        assert!(!controller.transactions().iter().any(|t| t.id == 2));
        assert_eq!(view_ids(&controller), [1]);
    }

    #[test]
    fn failed_delete_does_not_resurrect_after_refresh() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ]);

        // The delete is in flight when a refresh completes; the server has
        // already dropped record 2 from its response.
        let delete = controller.begin_delete(2).expect("Could not begin delete");
        let refresh = controller.begin_refresh();
        controller
            .finish_refresh(refresh, Ok(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]))
            .expect("Could not finish refresh");

        let got = controller.finish_delete(delete, Err(Error::ServerError(500)));

        assert!(matches!(got, Err(Error::DeleteFailed { id: 2, .. })));
        assert_eq!(view_ids(&controller), [1], "record 2 must not be resurrected");
    }

    #[test]
    fn view_is_a_subsequence_of_the_collection() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "not a date"),
            transaction(3, 30.0, "2024-05-01T00:00:00Z"),
            transaction(4, 40.0, "2024-06-10T00:00:00Z"),
        ]);
        controller.set_window(TimeWindow::Week);

        let view = view_ids(&controller);

        let collection_ids: Vec<TransactionId> = controller
            .transactions()
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        for id in &view {
            assert!(collection_ids.contains(id), "phantom record {id} in view");
        }
        let unique: std::collections::HashSet<TransactionId> = view.iter().copied().collect();
        assert_eq!(unique.len(), view.len(), "duplicate records in view");
    }

    #[test]
    fn view_recomputation_is_pure() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ]);
        controller.set_window(TimeWindow::Week);
        controller.set_sort(SortKey::AmountHighLow);

        let now = datetime!(2024-06-10 12:00:00 UTC);
        let first: Vec<TransactionId> =
            controller.view_at(now).iter().map(|t| t.id).collect();
        let second: Vec<TransactionId> =
            controller.view_at(now).iter().map(|t| t.id).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn view_applies_window_then_sort() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 30.0, "2024-06-08T00:00:00Z"),
            transaction(3, 30.0, "2024-06-07T00:00:00Z"),
            transaction(4, 99.0, "2024-01-01T00:00:00Z"),
        ]);
        controller.set_window(TimeWindow::Week);
        controller.set_sort(SortKey::AmountHighLow);

        // Record 4 is outside the window; 2 and 3 tie on amount and keep
        // their original order.
        assert_eq!(view_ids(&controller), [2, 3, 1]);
    }

    #[test]
    fn reset_filters_restores_defaults() {
        let mut controller = seeded_controller(Vec::new());
        controller.set_window(TimeWindow::Day);
        controller.set_sort(SortKey::AmountLowHigh);

        controller
            .handle(Command::ResetFilters)
            .expect("Could not reset filters");

        assert_eq!(controller.window(), TimeWindow::default_preset());
        assert_eq!(controller.sort_key(), SortKey::default_preset());
    }

    #[test]
    fn toggle_expand_twice_returns_to_original_state() {
        let mut controller = seeded_controller(vec![transaction(7, 50.0, "2024-06-09T00:00:00Z")]);

        controller
            .handle(Command::ToggleExpand(7))
            .expect("Could not toggle");
        assert!(controller.is_expanded(7));

        controller
            .handle(Command::ToggleExpand(7))
            .expect("Could not toggle");
        assert!(!controller.is_expanded(7));
    }

    #[test]
    fn expansion_survives_refresh() {
        let mut controller = seeded_controller(vec![transaction(7, 50.0, "2024-06-09T00:00:00Z")]);
        controller.toggle_expanded(7);

        let ticket = controller.begin_refresh();
        controller
            .finish_refresh(ticket, Ok(vec![transaction(7, 55.0, "2024-06-09T00:00:00Z")]))
            .expect("Could not finish refresh");

        assert!(controller.is_expanded(7));
    }

    #[test]
    fn edit_routes_by_category() {
        let controller = seeded_controller(vec![
            income(1, 1250.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ]);

        assert_eq!(controller.editor_for(1), Some(EditorRoute::Income));
        assert_eq!(controller.editor_for(2), Some(EditorRoute::Expense));
        assert_eq!(controller.editor_for(42), None);
    }

    #[test]
    fn edit_command_produces_an_open_editor_action() {
        let mut controller = seeded_controller(vec![income(1, 1250.0, "2024-06-09T00:00:00Z")]);

        let got = controller
            .handle(Command::RequestEdit(1))
            .expect("Could not handle edit command");

        assert_eq!(
            got,
            Some(Action::OpenEditor {
                route: EditorRoute::Income,
                id: 1,
            })
        );
    }

    #[test]
    fn apply_edited_replaces_by_id() {
        let mut controller = seeded_controller(vec![
            transaction(1, 10.0, "2024-06-09T00:00:00Z"),
            transaction(2, 20.0, "2024-06-08T00:00:00Z"),
        ]);

        controller.apply_edited(transaction(2, 99.0, "2024-06-08T00:00:00Z"));

        assert_eq!(controller.transactions().len(), 2);
        assert_eq!(controller.transactions()[1].amount, 99.0);
    }

    #[test]
    fn apply_edited_appends_a_new_record() {
        let mut controller = seeded_controller(vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")]);

        controller.apply_edited(transaction(2, 20.0, "2024-06-08T00:00:00Z"));

        assert_eq!(controller.transactions().len(), 2);
        assert_eq!(controller.transactions()[1].id, 2);
    }

    #[test]
    fn delete_command_produces_a_delete_action() {
        let mut controller = seeded_controller(vec![transaction(7, 50.0, "2024-06-09T00:00:00Z")]);

        let got = controller
            .handle(Command::RequestDelete(7))
            .expect("Could not handle delete command");

        match got {
            Some(Action::Delete(ticket)) => assert_eq!(ticket.id(), 7),
            other => panic!("want a delete action, got {other:?}"),
        }
        assert!(controller.transactions().is_empty());
    }

    #[tokio::test]
    async fn refresh_fetches_from_the_source() {
        let source = StubSource {
            transactions: vec![transaction(1, 10.0, "2024-06-09T00:00:00Z")],
            fail_fetch: false,
            fail_delete: false,
        };
        let mut controller = ListController::new(AuthToken::new("test-token"));

        controller
            .refresh(&source)
            .await
            .expect("Could not refresh");

        assert_eq!(controller.state(), ListState::Ready);
        assert_eq!(view_ids(&controller), [1]);
    }

    #[tokio::test]
    async fn delete_rolls_back_when_the_source_fails() {
        let source = StubSource {
            transactions: Vec::new(),
            fail_fetch: false,
            fail_delete: true,
        };
        let mut controller = seeded_controller(vec![
            transaction(5, 10.0, "2024-06-09T00:00:00Z"),
            transaction(7, 50.0, "2024-06-08T00:00:00Z"),
        ]);

        let got = controller.delete(&source, 7).await;

        assert!(matches!(got, Err(Error::DeleteFailed { id: 7, .. })));
        assert_eq!(view_ids(&controller), [5, 7]);
    }
}
