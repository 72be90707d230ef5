use crate::{
    error::DashboardError,
    state::{DashboardState, Notice, Page, SelectionKind},
};
use gov_hub::{
    Address, Eligibility, GovernanceDataSource, GraphqlDataSource, HubConfig, HubError,
    HubSubmitter, NftHoldings, ProposalFilter, Receipt, VoteSubmitter, WalletSession,
};
use gov_vote::{Choice, Delta, InvalidChoiceReason, ProposalId, VoteError, VotingType};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Drives the proposals section: loads proposals from the hub, keeps the
/// voter's allocations and casts their votes.
///
/// The state lock is never held while a collaborator is called, so a
/// refresh or an allocation edit can proceed while a vote is being
/// submitted.
pub struct Dashboard<D, W, S> {
    config: HubConfig,
    source: D,
    wallet: W,
    submitter: S,
    holdings: Option<Arc<dyn NftHoldings>>,
    state: Mutex<DashboardState>,
}

impl<W: WalletSession> Dashboard<GraphqlDataSource, W, HubSubmitter> {
    /// a dashboard talking to the hub over HTTP
    pub fn over_hub(config: HubConfig, wallet: W) -> Result<Self, HubError> {
        let source = GraphqlDataSource::new(&config)?;
        let submitter = HubSubmitter::new(&config)?;
        Ok(Self::new(config, source, wallet, submitter))
    }
}

impl<D, W, S> Dashboard<D, W, S>
where
    D: GovernanceDataSource,
    W: WalletSession,
    S: VoteSubmitter,
{
    pub fn new(config: HubConfig, source: D, wallet: W, submitter: S) -> Self {
        Dashboard {
            config,
            source,
            wallet,
            submitter,
            holdings: None,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// read NFT balances to tell the voter whether they are eligible, and
    /// to refuse their votes if `enforce_eligibility` is set
    pub fn with_holdings(mut self, holdings: Arc<dyn NftHoldings>) -> Self {
        self.holdings = Some(holdings);
        self
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// refetch the proposals of the configured space, and the NFT
    /// balances of the connected wallet.
    ///
    /// Allocations, vote records and voting power of the proposals that
    /// are no longer listed are dropped.
    ///
    /// # errors
    ///
    /// * `DataUnavailable` if the hub could not be read, the section is
    ///   then left empty
    ///
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        let filter = ProposalFilter::latest(self.config.page_size);
        let fetched = self
            .source
            .list_proposals(&self.config.space, &filter)
            .await;
        let eligibility = self.load_eligibility().await;

        let mut state = self.state.lock().await;
        state.eligibility = eligibility;
        match fetched {
            Ok(proposals) => {
                info!(space = %self.config.space, proposals = proposals.len(), "proposals refreshed");
                state.replace_proposals(proposals);
                Ok(())
            }
            Err(error) => {
                warn!(space = %self.config.space, %error, "cannot load proposals");
                state.mark_unavailable();
                Err(DashboardError::DataUnavailable(error))
            }
        }
    }

    /// fetch the connected voter's power for every listed proposal.
    /// Proposals whose power cannot be read are skipped.
    pub async fn load_voting_power(&self) -> Result<(), DashboardError> {
        let voter = self
            .wallet
            .current_address()
            .await
            .ok_or(DashboardError::NotConnected)?;
        let ids: Vec<ProposalId> = {
            let state = self.state.lock().await;
            state.proposals.iter().map(|p| p.id.clone()).collect()
        };

        let mut powers = Vec::with_capacity(ids.len());
        for id in ids {
            match self
                .source
                .get_voting_power(&self.config.space, &voter, &id)
                .await
            {
                Ok(power) => powers.push((id, power)),
                Err(error) => warn!(proposal = %id, %error, "cannot load voting power"),
            }
        }

        let mut state = self.state.lock().await;
        for (id, power) in powers {
            // a refresh may have happened meanwhile
            if state.proposal(&id).is_some() {
                state.voting_power.insert(id, power);
            }
        }
        Ok(())
    }

    pub async fn page(&self) -> Page {
        let address = match self.wallet.current_address().await {
            Some(address) => address,
            None => return Page::ConnectWallet,
        };
        let eligibility = self.eligibility_of(&address).await;

        let state = self.state.lock().await;
        Page::Proposals {
            address,
            eligibility,
            data_unavailable: state.data_unavailable,
            proposals: state.cards(&self.config.explorer_block_url),
        }
    }

    /// move one point of the voter's allocation on a quadratic proposal,
    /// returns the new value of the cell
    pub async fn adjust(
        &self,
        proposal: &ProposalId,
        choice: usize,
        delta: Delta,
    ) -> Result<u32, DashboardError> {
        let mut state = self.state.lock().await;
        let DashboardState {
            proposals,
            allocations,
            ..
        } = &mut *state;
        let proposal = proposals
            .iter()
            .find(|p| &p.id == proposal)
            .ok_or(DashboardError::UnknownProposal)?;

        let invalid = |reason| VoteError::InvalidChoice {
            proposal: proposal.id.clone(),
            reason,
        };
        if proposal.voting_type != VotingType::Quadratic {
            let reason = InvalidChoiceReason::TypeMismatch(proposal.voting_type.clone());
            return Err(invalid(reason).into());
        }
        if !proposal.is_active() {
            let reason = InvalidChoiceReason::NotActive(proposal.state.clone());
            return Err(invalid(reason).into());
        }

        Ok(allocations.adjust(proposal, choice, delta)?)
    }

    /// cast a single choice vote, `index` is the zero-based choice
    pub async fn vote_single(
        &self,
        proposal: &ProposalId,
        index: usize,
    ) -> Result<Receipt, DashboardError> {
        self.vote(proposal, SelectionKind::Single(index)).await
    }

    /// cast the voter's current allocation of a quadratic proposal
    pub async fn vote_quadratic(&self, proposal: &ProposalId) -> Result<Receipt, DashboardError> {
        self.vote(proposal, SelectionKind::Allocated).await
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    /// validate, submit once, and refetch on success.
    ///
    /// # errors
    ///
    /// * `InvalidChoice` or `UnknownProposal`, before anything else happens;
    /// * `SubmissionInFlight` if a vote for the proposal is still pending;
    /// * `NotConnected` without a wallet able to sign;
    /// * `Ineligible` when eligibility is enforced and the wallet holds
    ///   no gating NFT;
    /// * `SubmissionFailed`, the vote is not retried.
    ///
    async fn vote(
        &self,
        proposal: &ProposalId,
        kind: SelectionKind,
    ) -> Result<Receipt, DashboardError> {
        {
            let state = self.state.lock().await;
            state.submission(proposal, kind)?;
            if state.in_flight.contains(proposal) {
                return Err(DashboardError::SubmissionInFlight);
            }
        }

        let voter = self
            .wallet
            .current_address()
            .await
            .ok_or(DashboardError::NotConnected)?;
        let signer = self
            .wallet
            .signer()
            .await
            .ok_or(DashboardError::NotConnected)?;

        if self.config.enforce_eligibility {
            self.check_eligibility(&voter).await?;
        }

        let (submission, replaced) = {
            let mut state = self.state.lock().await;
            // the listing or the allocations may have changed meanwhile
            let submission = state.submission(proposal, kind)?;
            if !state.in_flight.insert(proposal.clone()) {
                return Err(DashboardError::SubmissionInFlight);
            }
            let replaced = match submission.choice() {
                Choice::Single(number) => {
                    Some(state.records.mark_pending(proposal.clone(), *number))
                }
                Choice::Quadratic(_) => None,
            };
            (submission, replaced)
        };

        debug!(%proposal, %voter, "submitting vote");
        let result = self
            .submitter
            .submit(signer.as_ref(), &voter, &self.config.space, &submission)
            .await;

        let receipt = {
            let mut state = self.state.lock().await;
            state.in_flight.remove(proposal);
            match result {
                Ok(receipt) => {
                    state.records.accept(proposal);
                    state.notice = Some(Notice::VoteAccepted);
                    receipt
                }
                Err(error) => {
                    warn!(%proposal, %error, "vote failed");
                    match replaced {
                        Some(Some(previous)) => {
                            state.records.restore(proposal.clone(), previous)
                        }
                        Some(None) => {
                            state.records.discard(proposal);
                        }
                        None => {}
                    }
                    state.notice = Some(Notice::VoteFailed(error.to_string()));
                    return Err(DashboardError::SubmissionFailed(error));
                }
            }
        };

        info!(%proposal, receipt = %receipt.id, "vote recorded");
        if let Err(error) = self.refresh().await {
            warn!(%error, "cannot refresh proposals after the vote");
        }
        Ok(receipt)
    }

    async fn load_eligibility(&self) -> Option<(Address, Eligibility)> {
        let holdings = self.holdings.as_ref()?;
        let address = self.wallet.current_address().await?;
        let eligibility =
            Eligibility::check(holdings.as_ref(), &self.config.nft_collections, &address).await;
        Some((address, eligibility))
    }

    /// the balances read by the last refresh, read again only when the
    /// wallet changed since
    async fn eligibility_of(&self, address: &Address) -> Option<Eligibility> {
        let holdings = self.holdings.as_ref()?;
        {
            let state = self.state.lock().await;
            if let Some((cached, eligibility)) = &state.eligibility {
                if cached == address {
                    return Some(eligibility.clone());
                }
            }
        }

        let eligibility =
            Eligibility::check(holdings.as_ref(), &self.config.nft_collections, address).await;
        self.state.lock().await.eligibility = Some((address.clone(), eligibility.clone()));
        Some(eligibility)
    }

    async fn check_eligibility(&self, voter: &Address) -> Result<(), DashboardError> {
        let eligibility = match self.eligibility_of(voter).await {
            Some(eligibility) => eligibility,
            None => {
                warn!("eligibility is enforced but no NFT holdings are configured");
                return Ok(());
            }
        };

        if eligibility.is_eligible() {
            return Ok(());
        }

        self.state.lock().await.notice = Some(Notice::Ineligible);
        Err(DashboardError::Ineligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProposalCard;
    use async_trait::async_trait;
    use gov_hub::{NftCollection, Signature, TypedVote, VoteSigner, VotingPower};
    use gov_vote::{
        testing::{ProposalBuilder, TEST_SPACE},
        Proposal, ProposalState, VoteStatus, VoteSubmission,
    };
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex as StdMutex,
    };
    use tokio::sync::Notify;

    const VOTER: &str = "0xC432013CbA34F5202c3cAf109d3456d3b97e11bB";

    #[derive(Default)]
    struct RecordingSource {
        proposals: StdMutex<Vec<Proposal>>,
        unavailable: AtomicBool,
        list_calls: AtomicUsize,
    }

    impl RecordingSource {
        fn listing(proposals: Vec<Proposal>) -> Self {
            let source = RecordingSource::default();
            *source.proposals.lock().unwrap() = proposals;
            source
        }
    }

    #[async_trait]
    impl GovernanceDataSource for RecordingSource {
        async fn list_proposals(
            &self,
            space: &str,
            filter: &ProposalFilter,
        ) -> Result<Vec<Proposal>, HubError> {
            assert_eq!(space, TEST_SPACE);
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(HubError::MissingData);
            }
            let proposals = self.proposals.lock().unwrap();
            Ok(proposals.iter().take(filter.first as usize).cloned().collect())
        }

        async fn get_voting_power(
            &self,
            _space: &str,
            _voter: &Address,
            proposal: &ProposalId,
        ) -> Result<VotingPower, HubError> {
            if proposal.as_str() == "0x02" {
                return Err(HubError::MissingData);
            }
            Ok(VotingPower {
                vp: 3.0,
                vp_by_strategy: vec![3.0],
                vp_state: "final".to_string(),
            })
        }

        async fn get_space(&self, _space: &str) -> Result<Option<gov_hub::Space>, HubError> {
            Ok(None)
        }
    }

    struct FixedSigner;

    #[async_trait]
    impl VoteSigner for FixedSigner {
        async fn sign_vote(&self, _vote: &TypedVote) -> Result<Signature, HubError> {
            Ok(Signature("0xsigned".to_string()))
        }
    }

    struct TestWallet {
        address: Option<Address>,
    }

    impl TestWallet {
        fn connected() -> Self {
            TestWallet {
                address: Some(VOTER.parse().unwrap()),
            }
        }

        fn disconnected() -> Self {
            TestWallet { address: None }
        }
    }

    #[async_trait]
    impl WalletSession for TestWallet {
        async fn current_address(&self) -> Option<Address> {
            self.address.clone()
        }

        async fn signer(&self) -> Option<Arc<dyn VoteSigner>> {
            self.address
                .as_ref()
                .map(|_| Arc::new(FixedSigner) as Arc<dyn VoteSigner>)
        }
    }

    #[derive(Default)]
    struct RecordingSubmitter {
        submissions: StdMutex<Vec<VoteSubmission>>,
        reject: AtomicBool,
        /// when set, every submission waits for `release`
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    impl RecordingSubmitter {
        fn rejecting() -> Self {
            RecordingSubmitter {
                reject: AtomicBool::new(true),
                ..Default::default()
            }
        }

        fn gated(started: Arc<Notify>, release: Arc<Notify>) -> Self {
            RecordingSubmitter {
                gate: Some((started, release)),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VoteSubmitter for RecordingSubmitter {
        async fn submit(
            &self,
            _signer: &dyn VoteSigner,
            _voter: &Address,
            _space: &str,
            submission: &VoteSubmission,
        ) -> Result<Receipt, HubError> {
            self.submissions.lock().unwrap().push(submission.clone());
            if let Some((started, release)) = &self.gate {
                started.notify_one();
                release.notified().await;
            }
            if self.reject.load(Ordering::SeqCst) {
                return Err(HubError::Rejected("no voting power".to_string()));
            }
            Ok(Receipt {
                id: "0xreceipt".to_string(),
                ipfs: None,
            })
        }
    }

    /// holds nothing, counts the balance reads
    #[derive(Default)]
    struct NoHoldings {
        reads: AtomicUsize,
    }

    #[async_trait]
    impl NftHoldings for NoHoldings {
        async fn balance_of(
            &self,
            _collection: &NftCollection,
            _owner: &Address,
        ) -> Result<u64, HubError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    fn config() -> HubConfig {
        HubConfig {
            space: TEST_SPACE.to_string(),
            ..HubConfig::default()
        }
    }

    fn single() -> Proposal {
        ProposalBuilder::with_choices(3).id("0x01").build()
    }

    fn quadratic() -> Proposal {
        ProposalBuilder::with_choices(3).id("0x02").quadratic().build()
    }

    fn closed() -> Proposal {
        ProposalBuilder::with_choices(2)
            .id("0x03")
            .scores(&[10.0, 4.0])
            .state(ProposalState::Closed)
            .build()
    }

    type TestDashboard = Dashboard<RecordingSource, TestWallet, RecordingSubmitter>;

    async fn loaded(submitter: RecordingSubmitter) -> TestDashboard {
        let source = RecordingSource::listing(vec![single(), quadratic(), closed()]);
        let dashboard = Dashboard::new(config(), source, TestWallet::connected(), submitter);
        dashboard.refresh().await.unwrap();
        dashboard
    }

    fn cards(page: Page) -> Vec<ProposalCard> {
        match page {
            Page::Proposals { proposals, .. } => proposals,
            Page::ConnectWallet => panic!("expected the proposals page"),
        }
    }

    #[tokio::test]
    async fn without_wallet_only_connection_is_offered() {
        let dashboard = Dashboard::new(
            config(),
            RecordingSource::listing(vec![single()]),
            TestWallet::disconnected(),
            RecordingSubmitter::default(),
        );
        dashboard.refresh().await.unwrap();

        assert_eq!(dashboard.page().await, Page::ConnectWallet);
        assert!(matches!(
            dashboard.vote_single(&single().id, 0).await,
            Err(DashboardError::NotConnected)
        ));
        assert!(matches!(
            dashboard.load_voting_power().await,
            Err(DashboardError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn page_lists_the_latest_proposals() {
        let dashboard = loaded(RecordingSubmitter::default()).await;

        let cards = cards(dashboard.page().await);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].view.winner, Some(0));
        assert!(cards.iter().all(|card| !card.in_flight));
        assert_eq!(cards[1].view.choices[0].allocated, Some(0));
    }

    #[tokio::test]
    async fn failed_refresh_leaves_the_section_empty() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        dashboard.adjust(&quadratic().id, 2, Delta::Increment).await.unwrap();
        dashboard.source.unavailable.store(true, Ordering::SeqCst);

        assert!(matches!(
            dashboard.refresh().await,
            Err(DashboardError::DataUnavailable(_))
        ));
        match dashboard.page().await {
            Page::Proposals {
                data_unavailable,
                proposals,
                ..
            } => {
                assert!(data_unavailable);
                assert!(proposals.is_empty());
            }
            Page::ConnectWallet => panic!("expected the proposals page"),
        }

        dashboard.source.unavailable.store(false, Ordering::SeqCst);
        dashboard.refresh().await.unwrap();
        let cards = cards(dashboard.page().await);
        assert_eq!(cards[1].view.choices[2].allocated, Some(1));
    }

    #[tokio::test]
    async fn refetch_drops_allocations_of_removed_proposals() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        dashboard.adjust(&quadratic().id, 0, Delta::Increment).await.unwrap();

        *dashboard.source.proposals.lock().unwrap() = vec![single(), closed()];
        dashboard.refresh().await.unwrap();
        *dashboard.source.proposals.lock().unwrap() = vec![single(), quadratic(), closed()];
        dashboard.refresh().await.unwrap();

        let cards = cards(dashboard.page().await);
        assert_eq!(cards[1].view.choices[0].allocated, Some(0));
    }

    #[tokio::test]
    async fn allocation_edits() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        let id = quadratic().id;

        assert_eq!(dashboard.adjust(&id, 1, Delta::Decrement).await.unwrap(), 0);
        assert_eq!(dashboard.adjust(&id, 1, Delta::Increment).await.unwrap(), 1);
        assert_eq!(dashboard.adjust(&id, 1, Delta::Increment).await.unwrap(), 2);

        assert!(matches!(
            dashboard.adjust(&id, 3, Delta::Increment).await,
            Err(DashboardError::InvalidChoice(_))
        ));
        assert!(matches!(
            dashboard.adjust(&single().id, 0, Delta::Increment).await,
            Err(DashboardError::InvalidChoice(_))
        ));
        assert!(matches!(
            dashboard.adjust(&"0x404".into(), 0, Delta::Increment).await,
            Err(DashboardError::UnknownProposal)
        ));
    }

    #[tokio::test]
    async fn invalid_votes_never_reach_the_hub() {
        let dashboard = loaded(RecordingSubmitter::default()).await;

        assert!(matches!(
            dashboard.vote_single(&single().id, 3).await,
            Err(DashboardError::InvalidChoice(_))
        ));
        assert!(matches!(
            dashboard.vote_single(&closed().id, 0).await,
            Err(DashboardError::InvalidChoice(_))
        ));
        assert!(matches!(
            dashboard.vote_quadratic(&single().id).await,
            Err(DashboardError::InvalidChoice(_))
        ));
        assert_eq!(dashboard.submitter.calls(), 0);
    }

    #[tokio::test]
    async fn accepted_vote_is_recorded_and_refetched() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        let before = dashboard.source.list_calls.load(Ordering::SeqCst);

        let receipt = dashboard.vote_single(&single().id, 1).await.unwrap();

        assert_eq!(receipt.id, "0xreceipt");
        assert_eq!(dashboard.source.list_calls.load(Ordering::SeqCst), before + 1);
        assert_eq!(dashboard.notice().await, Some(Notice::VoteAccepted));
        {
            let state = dashboard.state.lock().await;
            let vote = state.records.get(&single().id).unwrap();
            assert_eq!(vote.choice, 2);
            assert_eq!(vote.status, VoteStatus::Accepted);
        }
        let cards = cards(dashboard.page().await);
        assert!(cards[0].view.choices[1].highlighted);

        dashboard.dismiss_notice().await;
        assert_eq!(dashboard.notice().await, None);
    }

    #[tokio::test]
    async fn quadratic_vote_sends_the_allocation() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        let id = quadratic().id;
        dashboard.adjust(&id, 0, Delta::Increment).await.unwrap();
        dashboard.adjust(&id, 2, Delta::Increment).await.unwrap();
        dashboard.adjust(&id, 2, Delta::Increment).await.unwrap();

        dashboard.vote_quadratic(&id).await.unwrap();

        let submissions = dashboard.submitter.submissions.lock().unwrap();
        match submissions[0].choice() {
            Choice::Quadratic(points) => {
                let entries: Vec<(String, u32)> = points.entries().collect();
                assert_eq!(
                    entries,
                    vec![
                        ("1".to_string(), 1),
                        ("2".to_string(), 0),
                        ("3".to_string(), 2)
                    ]
                );
            }
            other => panic!("unexpected choice {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_vote_is_not_retried_nor_recorded() {
        let dashboard = loaded(RecordingSubmitter::rejecting()).await;
        let before = dashboard.source.list_calls.load(Ordering::SeqCst);

        assert!(matches!(
            dashboard.vote_single(&single().id, 0).await,
            Err(DashboardError::SubmissionFailed(HubError::Rejected(_)))
        ));

        assert_eq!(dashboard.submitter.calls(), 1);
        assert_eq!(dashboard.source.list_calls.load(Ordering::SeqCst), before);
        assert!(matches!(
            dashboard.notice().await,
            Some(Notice::VoteFailed(_))
        ));
        let state = dashboard.state.lock().await;
        assert!(state.records.get(&single().id).is_none());
        assert!(state.in_flight.is_empty());
    }

    #[tokio::test]
    async fn second_vote_is_refused_while_one_is_in_flight() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let dashboard = Arc::new(
            loaded(RecordingSubmitter::gated(started.clone(), release.clone())).await,
        );

        let first = {
            let dashboard = dashboard.clone();
            let id = single().id;
            tokio::spawn(async move { dashboard.vote_single(&id, 0).await })
        };
        started.notified().await;

        {
            let state = dashboard.state.lock().await;
            let vote = state.records.get(&single().id).unwrap();
            assert_eq!(vote.status, VoteStatus::Pending);
        }
        assert!(cards(dashboard.page().await)[0].in_flight);
        assert!(matches!(
            dashboard.vote_single(&single().id, 1).await,
            Err(DashboardError::SubmissionInFlight)
        ));

        release.notify_one();
        first.await.unwrap().unwrap();

        assert_eq!(dashboard.submitter.calls(), 1);
        assert!(!cards(dashboard.page().await)[0].in_flight);
    }

    #[tokio::test]
    async fn balances_are_read_on_refresh_not_on_render() {
        let holdings = Arc::new(NoHoldings::default());
        let dashboard = Dashboard::new(
            config(),
            RecordingSource::listing(vec![single()]),
            TestWallet::connected(),
            RecordingSubmitter::default(),
        )
        .with_holdings(holdings.clone());
        let collections = config().nft_collections.len();

        dashboard.refresh().await.unwrap();
        assert_eq!(holdings.reads.load(Ordering::SeqCst), collections);

        dashboard.page().await;
        dashboard.page().await;
        assert_eq!(holdings.reads.load(Ordering::SeqCst), collections);

        dashboard.refresh().await.unwrap();
        assert_eq!(holdings.reads.load(Ordering::SeqCst), 2 * collections);
    }

    #[tokio::test]
    async fn untallied_proposals_keep_their_choices() {
        let untallied = ProposalBuilder::with_choices(3).id("0x04").scores(&[]).build();
        let dashboard = Dashboard::new(
            config(),
            RecordingSource::listing(vec![untallied.clone()]),
            TestWallet::connected(),
            RecordingSubmitter::default(),
        );
        dashboard.refresh().await.unwrap();

        let cards = cards(dashboard.page().await);
        assert_eq!(cards[0].view.choices.len(), 3);
        assert!(cards[0]
            .view
            .choices
            .iter()
            .all(|choice| choice.interactive && choice.votes == "0"));
        dashboard.vote_single(&untallied.id, 2).await.unwrap();
    }

    #[tokio::test]
    async fn failed_revote_keeps_the_accepted_vote() {
        let dashboard = loaded(RecordingSubmitter::default()).await;
        dashboard.vote_single(&single().id, 0).await.unwrap();
        dashboard.submitter.reject.store(true, Ordering::SeqCst);

        assert!(matches!(
            dashboard.vote_single(&single().id, 2).await,
            Err(DashboardError::SubmissionFailed(_))
        ));

        let state = dashboard.state.lock().await;
        let vote = state.records.get(&single().id).unwrap();
        assert_eq!(vote.choice, 1);
        assert_eq!(vote.status, VoteStatus::Accepted);
    }

    #[tokio::test]
    async fn voting_power_is_loaded_per_proposal() {
        let dashboard = loaded(RecordingSubmitter::default()).await;

        dashboard.load_voting_power().await.unwrap();

        let powers: Vec<Option<f64>> = cards(dashboard.page().await)
            .iter()
            .map(|card| card.voting_power)
            .collect();
        assert_eq!(powers, vec![Some(3.0), None, Some(3.0)]);
    }

    #[tokio::test]
    async fn eligibility_is_shown_and_optionally_enforced() {
        let source = RecordingSource::listing(vec![single()]);
        let dashboard = Dashboard::new(
            config(),
            source,
            TestWallet::connected(),
            RecordingSubmitter::default(),
        )
        .with_holdings(Arc::new(NoHoldings::default()));
        dashboard.refresh().await.unwrap();

        match dashboard.page().await {
            Page::Proposals { eligibility, .. } => {
                assert!(!eligibility.unwrap().is_eligible())
            }
            Page::ConnectWallet => panic!("expected the proposals page"),
        }
        // displayed only, the vote still goes through
        dashboard.vote_single(&single().id, 0).await.unwrap();

        let enforcing = Dashboard::new(
            HubConfig {
                enforce_eligibility: true,
                ..config()
            },
            RecordingSource::listing(vec![single()]),
            TestWallet::connected(),
            RecordingSubmitter::default(),
        )
        .with_holdings(Arc::new(NoHoldings::default()));
        enforcing.refresh().await.unwrap();

        assert!(matches!(
            enforcing.vote_single(&single().id, 0).await,
            Err(DashboardError::Ineligible)
        ));
        assert_eq!(enforcing.submitter.calls(), 0);
        assert_eq!(enforcing.notice().await, Some(Notice::Ineligible));
    }
}
