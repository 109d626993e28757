//! The read-only bundle of upstream collections every derivation runs over.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    balances::{LiveStatistics, OpeningBalances},
    holdings::{ChitGroup, Investment, Liability},
    invoice::Invoice,
    party::{Customer, Supplier},
    payment::Payment,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Materialized upstream data at one point in time. Payments keep their
/// insertion order, which breaks ties in chronological replays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub chit_groups: Vec<ChitGroup>,
    #[serde(default)]
    pub opening_balances: OpeningBalances,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<LiveStatistics>,
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u8,
}

impl Snapshot {
    pub fn new(opening_balances: OpeningBalances) -> Self {
        Self {
            payments: Vec::new(),
            invoices: Vec::new(),
            customers: Vec::new(),
            suppliers: Vec::new(),
            liabilities: Vec::new(),
            investments: Vec::new(),
            chit_groups: Vec::new(),
            opening_balances,
            statistics: None,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        id
    }

    pub fn add_invoice(&mut self, invoice: Invoice) -> Uuid {
        let id = invoice.id;
        self.invoices.push(invoice);
        id
    }

    pub fn add_customer(&mut self, customer: Customer) -> Uuid {
        let id = customer.id;
        self.customers.push(customer);
        id
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> Uuid {
        let id = supplier.id;
        self.suppliers.push(supplier);
        id
    }

    pub fn add_liability(&mut self, liability: Liability) -> Uuid {
        let id = liability.id;
        self.liabilities.push(liability);
        id
    }

    pub fn add_investment(&mut self, investment: Investment) -> Uuid {
        let id = investment.id;
        self.investments.push(investment);
        id
    }

    pub fn add_chit_group(&mut self, group: ChitGroup) -> Uuid {
        let id = group.id;
        self.chit_groups.push(group);
        id
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(OpeningBalances::default())
    }
}
