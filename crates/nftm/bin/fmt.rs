//! Table rendering of service records.

use alloy_primitives::Address;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use nftm_gateway::{Activity, Collection, Item, Order, OrderStatus, Page};
use nftm_wallets::{Session, SessionEvent};
use std::fmt::Display;

/// Records that render as one table row.
pub trait TableRow {
    const HEADER: &'static [&'static str];

    fn row(&self) -> Vec<Cell>;
}

/// Renders `page` as a table followed by a paging footer.
pub fn page<T: TableRow>(page: &Page<T>) -> String {
    if page.is_empty() {
        return "no records".to_string();
    }
    let mut table = table(T::HEADER);
    for record in &page.records {
        table.add_row(record.row());
    }
    let mut out = format!(
        "{table}\npage {} of {} ({} total)",
        page.page,
        page.total_pages.max(1),
        page.total
    );
    if page.has_more() {
        out.push_str(&format!(", next: --page {}", page.page + 1));
    }
    out
}

/// Renders a single record as a two column table.
pub fn record<T: TableRow>(record: &T) -> String {
    let mut table = table(&["Field", "Value"]);
    for (name, cell) in T::HEADER.iter().zip(record.row()) {
        table.add_row(vec![Cell::new(name), cell]);
    }
    table.to_string()
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(header.iter().map(Cell::new));
    table
}

fn opt<T: Display>(value: Option<T>) -> Cell {
    Cell::new(value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
}

fn short(address: Option<Address>) -> Cell {
    opt(address.map(|a| {
        let s = a.to_string();
        format!("{}…{}", &s[..6], &s[s.len() - 4..])
    }))
}

impl TableRow for Order {
    const HEADER: &'static [&'static str] =
        &["ID", "Order", "Type", "Status", "Collection", "Token", "Price", "Maker", "Expires"];

    fn row(&self) -> Vec<Cell> {
        let color = match self.order_status {
            OrderStatus::Active => Color::Green,
            OrderStatus::Filled => Color::Cyan,
            OrderStatus::Cancelled | OrderStatus::Expired => Color::DarkGrey,
        };
        vec![
            Cell::new(self.id),
            Cell::new(&self.order_id),
            Cell::new(self.order_type),
            Cell::new(self.order_status).fg(color),
            short(self.collection_address),
            opt(self.token_id.as_ref()),
            Cell::new(self.price),
            short(self.maker),
            opt(self.expire_time),
        ]
    }
}

impl TableRow for Item {
    const HEADER: &'static [&'static str] =
        &["ID", "Name", "Collection", "Token", "Owner", "Supply", "List price", "Sale price"];

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            short(self.collection_address),
            Cell::new(&self.token_id),
            short(self.owner),
            Cell::new(self.supply),
            opt(self.list_price),
            opt(self.sale_price),
        ]
    }
}

impl TableRow for Collection {
    const HEADER: &'static [&'static str] =
        &["ID", "Name", "Symbol", "Address", "Chain", "Items", "Owners", "Floor", "Volume"];

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.name),
            Cell::new(&self.symbol),
            Cell::new(self.address),
            Cell::new(self.chain_id),
            Cell::new(self.item_amount),
            Cell::new(self.owner_amount),
            opt(self.floor_price),
            opt(self.volume_total),
        ]
    }
}

impl TableRow for Activity {
    const HEADER: &'static [&'static str] =
        &["ID", "Type", "Collection", "Token", "Price", "Maker", "Taker", "Block", "Time"];

    fn row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(self.activity_type),
            short(self.collection_address),
            opt(self.token_id.as_ref()),
            Cell::new(self.price),
            short(self.maker),
            short(self.taker),
            Cell::new(self.block_number),
            opt(self.event_time),
        ]
    }
}

pub fn session(session: &Session) -> String {
    match session.account() {
        None => "disconnected".to_string(),
        Some(_) => format!("{}: {session}", session.state()),
    }
}

pub fn event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Connected(session) => format!("connected {session}"),
        SessionEvent::AccountChanged { previous, current } => {
            format!("account changed from {previous} to {current}")
        }
        SessionEvent::ChainChanged { chain_id } => {
            format!("chain changed to {chain_id}; marketplace data loaded before is stale")
        }
        SessionEvent::Disconnected => "disconnected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use nftm_gateway::OrderType;

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id,
            marketplace_id: 1,
            order_id: format!("0x{id:02x}"),
            order_status: status,
            order_type: OrderType::Listing,
            event_time: None,
            collection_address: Some(address!("0x5FbDB2315678afecb367f032d93F642f64180aa3")),
            token_id: Some("7".into()),
            expire_time: None,
            price: 1.5,
            maker: None,
            taker: None,
            quantity_remaining: 1,
            size: 1,
            salt: None,
            currency_address: String::new(),
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn renders_page_footer() {
        let page = Page {
            records: vec![order(1, OrderStatus::Active), order(2, OrderStatus::Filled)],
            total: 45,
            page: 1,
            page_size: 2,
            total_pages: 23,
        };
        let out = super::page(&page);
        assert!(out.contains("listing"), "{out}");
        assert!(out.contains("0x5FbD…0aa3"), "{out}");
        assert!(out.ends_with("page 1 of 23 (45 total), next: --page 2"), "{out}");

        let empty = Page::<Order>::from_records(vec![]);
        assert_eq!(super::page(&empty), "no records");
    }

    #[test]
    fn renders_record_fields() {
        let out = record(&order(9, OrderStatus::Cancelled));
        assert!(out.contains("Status"), "{out}");
        assert!(out.contains("cancelled"), "{out}");
        assert!(out.contains("Expires"), "{out}");
    }

    #[test]
    fn renders_session() {
        assert_eq!(session(&Session::default()), "disconnected");
        let test = session(&Session::test());
        assert!(test.starts_with("connected (test mode): "), "{test}");
        assert!(event(&SessionEvent::ChainChanged { chain_id: 137 }).contains("stale"));
    }
}
