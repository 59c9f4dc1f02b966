//! Machine aggregate implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use event_log::EventLog;

use crate::aggregate::Aggregate;
use crate::config::MachineConfig;

use super::projection::{self, MachineView};
use super::{
    Catalog, ChangeError, ChangeMaker, Coin, DisplayState, MachineCommand, MachineError, MachineId,
    MachineQuery, Money, Product, QueryResponse, VendingEvent,
};

/// Vending machine aggregate root.
///
/// A machine is its catalog, its presentation settings and its event log.
/// Balance, chutes and display are all read from the log on demand, and
/// every command yields a new machine value.
#[derive(Debug, Clone)]
pub struct Machine {
    /// Correlates log lines for one machine.
    id: MachineId,

    /// Coin values and product prices.
    catalog: Arc<Catalog>,

    /// Display window and amount formatting.
    config: MachineConfig,

    /// Everything that ever happened to this machine.
    log: EventLog<VendingEvent>,
}

impl Machine {
    /// Creates an idle machine with default settings.
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self::with_config(catalog, MachineConfig::default())
    }

    /// Creates an idle machine with the given settings.
    pub fn with_config(catalog: impl Into<Arc<Catalog>>, config: MachineConfig) -> Self {
        Self::from_log(catalog, config, EventLog::new())
    }

    /// Restores a machine from a previously recorded log.
    pub fn from_log(
        catalog: impl Into<Arc<Catalog>>,
        config: MachineConfig,
        log: EventLog<VendingEvent>,
    ) -> Self {
        Self {
            id: MachineId::new(),
            catalog: catalog.into(),
            config,
            log,
        }
    }

    /// Handles a command at `now` and returns the next machine value.
    pub fn execute(
        &self,
        command: MachineCommand,
        now: DateTime<Utc>,
    ) -> Result<Machine, MachineError> {
        let events = self.handle(&command, now)?;
        Ok(self.apply_events(events))
    }
}

impl Aggregate for Machine {
    type Event = VendingEvent;
    type Command = MachineCommand;
    type Error = MachineError;

    fn aggregate_type() -> &'static str {
        "VendingMachine"
    }

    fn log(&self) -> &EventLog<VendingEvent> {
        &self.log
    }

    fn with_log(&self, log: EventLog<VendingEvent>) -> Self {
        Self {
            id: self.id,
            catalog: Arc::clone(&self.catalog),
            config: self.config,
            log,
        }
    }

    fn handle(
        &self,
        command: &MachineCommand,
        now: DateTime<Utc>,
    ) -> Result<Vec<VendingEvent>, MachineError> {
        match command {
            MachineCommand::InsertCoin(coin) => Ok(self.insert_coin(coin)),
            MachineCommand::ChooseProduct(code) => self.choose_product(code, now),
            MachineCommand::TakeProducts => Ok(vec![VendingEvent::products_collected()]),
            MachineCommand::ReturnCoins => Ok(self.return_coins(now)),
            MachineCommand::TakeCoins => Ok(vec![VendingEvent::coins_collected()]),
        }
    }
}

// Query methods
impl Machine {
    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the unspent credit.
    pub fn active_amount(&self) -> Money {
        projection::active_amount(&self.log)
    }

    /// Returns the products waiting in the chute.
    pub fn chute(&self) -> Vec<Product> {
        projection::chute(&self.log)
    }

    /// Returns the coins waiting in the coin chute.
    pub fn coin_chute(&self) -> Vec<Coin> {
        projection::coin_chute(&self.log)
    }

    /// Returns the accepted coins still inside the machine.
    pub fn available_coins(&self) -> Vec<Coin> {
        projection::available_coins(&self.log)
    }

    /// Returns the full read model.
    pub fn view(&self) -> MachineView {
        MachineView::from_log(&self.log)
    }

    /// Returns the display state at `now`.
    pub fn display_state_at(&self, now: DateTime<Utc>) -> DisplayState {
        DisplayState::at(
            &projection::timed_events(&self.log),
            now,
            self.config.display_window,
        )
    }

    /// Returns the display text at `now`.
    pub fn display_at(&self, now: DateTime<Utc>) -> String {
        self.display_state_at(now).render(
            self.active_amount(),
            &self.catalog,
            self.config.decimal_separator,
        )
    }

    /// Answers a query at `now`.
    pub fn query(&self, query: MachineQuery, now: DateTime<Utc>) -> QueryResponse {
        match query {
            MachineQuery::CheckDisplay => QueryResponse::Display(self.display_at(now)),
            MachineQuery::CheckChute => QueryResponse::Chute(self.chute()),
            MachineQuery::CheckCoinChute => QueryResponse::CoinChute(self.coin_chute()),
            MachineQuery::CheckActiveAmount => QueryResponse::ActiveAmount(self.active_amount()),
        }
    }
}

// Command methods (return events)
impl Machine {
    /// Accepts a coin the catalog knows and returns any other.
    pub fn insert_coin(&self, coin: &Coin) -> Vec<VendingEvent> {
        match self.catalog.coin_value(coin) {
            Some(value) => vec![
                VendingEvent::coin_accepted(coin.clone()),
                VendingEvent::balance_increased(value),
            ],
            None => vec![VendingEvent::coin_returned(coin.clone())],
        }
    }

    /// Sells the product if the balance covers its price.
    pub fn choose_product(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VendingEvent>, MachineError> {
        let product = Product::from_code(code).ok_or_else(|| MachineError::UnknownProduct {
            code: code.to_string(),
        })?;
        let price = self.catalog.product_price(product);

        if self.active_amount() >= price {
            Ok(vec![
                VendingEvent::balance_decreased(price),
                VendingEvent::product_dispensed(product, now),
            ])
        } else {
            Ok(vec![VendingEvent::button_pressed(product, now)])
        }
    }

    /// Refunds the whole balance from the coins inside, or nothing at all.
    pub fn return_coins(&self, now: DateTime<Utc>) -> Vec<VendingEvent> {
        let balance = self.active_amount();
        if !balance.is_positive() {
            return vec![];
        }

        let available = self.available_coins();
        match ChangeMaker::new(&self.catalog).make_change(balance, Some(available.as_slice())) {
            Ok(coins) => coins
                .into_iter()
                .map(VendingEvent::coin_returned)
                .chain(std::iter::once(VendingEvent::balance_decreased(balance)))
                .collect(),
            Err(ChangeError::Insufficient { .. }) => {
                vec![VendingEvent::insufficient_change(balance, now)]
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Catalog::euro())
    }
}
