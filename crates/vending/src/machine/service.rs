//! Machine service providing a simplified API for machine operations.

use crate::clock::Clock;
use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    Coin, DisplayState, Machine, MachineCommand, MachineQuery, Money, Product, QueryResponse,
    VendingEvent,
};

/// Service for operating one machine.
///
/// Holds the latest machine value and advances it with every command. The
/// clock that stamps events is also the one the display is read against.
pub struct MachineService<C: Clock> {
    handler: CommandHandler<C, Machine>,
    machine: Machine,
}

impl<C: Clock> MachineService<C> {
    /// Creates a service for `machine` reading time from `clock`.
    pub fn new(machine: Machine, clock: C) -> Self {
        Self {
            handler: CommandHandler::new(clock),
            machine,
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<C, Machine> {
        &self.handler
    }

    /// Returns the latest machine value.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Inserts a coin.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn insert_coin(&mut self, coin: Coin) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(MachineCommand::InsertCoin(coin))
    }

    /// Presses a product button.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn choose_product(&mut self, code: &str) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(MachineCommand::choose_product(code))
    }

    /// Empties the product chute.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn take_products(&mut self) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(MachineCommand::TakeProducts)
    }

    /// Asks for the balance back.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn return_coins(&mut self) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(MachineCommand::ReturnCoins)
    }

    /// Empties the coin chute.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn take_coins(&mut self) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(MachineCommand::TakeCoins)
    }

    /// Executes any machine command.
    #[tracing::instrument(skip(self), fields(machine_id = %self.machine.id()))]
    pub fn execute(
        &mut self,
        command: MachineCommand,
    ) -> Result<CommandResult<Machine>, DomainError> {
        self.dispatch(command)
    }

    /// Returns the display text now.
    pub fn display(&self) -> String {
        self.machine.display_at(self.handler.now())
    }

    /// Returns the display state now.
    pub fn display_state(&self) -> DisplayState {
        self.machine.display_state_at(self.handler.now())
    }

    pub fn chute(&self) -> Vec<Product> {
        self.machine.chute()
    }

    pub fn coin_chute(&self) -> Vec<Coin> {
        self.machine.coin_chute()
    }

    pub fn active_amount(&self) -> Money {
        self.machine.active_amount()
    }

    /// Answers a query now.
    pub fn query(&self, query: MachineQuery) -> QueryResponse {
        self.machine.query(query, self.handler.now())
    }

    fn dispatch(
        &mut self,
        command: MachineCommand,
    ) -> Result<CommandResult<Machine>, DomainError> {
        let result = self.handler.execute(&self.machine, &command)?;
        record_outcome(&command, &result.events);
        self.machine = result.aggregate.clone();
        Ok(result)
    }
}

fn record_outcome(command: &MachineCommand, events: &[VendingEvent]) {
    for event in events {
        match event {
            VendingEvent::ProductDispensed(data) => {
                metrics::counter!("vending_products_dispensed_total").increment(1);
                tracing::info!(product = %data.product, "product dispensed");
            }
            VendingEvent::InsufficientChange(data) => {
                metrics::counter!("vending_insufficient_change_total").increment(1);
                tracing::warn!(requested = %data.requested, "cannot make exact change");
            }
            VendingEvent::BalanceDecreased(data)
                if matches!(command, MachineCommand::ReturnCoins) =>
            {
                tracing::info!(amount = %data.amount, "balance returned");
            }
            _ => {}
        }
    }
}
