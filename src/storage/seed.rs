//! Demo fleet loaded at startup.

use crate::domain::Shipment;

#[allow(clippy::too_many_arguments)]
fn shipment(
    id: &str,
    name: &str,
    age: u32,
    class: &str,
    subjects: [&str; 2],
    attendance: f64,
    origin: &str,
    destination: &str,
    priority: &str,
) -> Shipment {
    Shipment {
        id: id.to_string(),
        name: name.to_string(),
        age,
        class: class.to_string(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        attendance,
        origin: Some(origin.to_string()),
        destination: Some(destination.to_string()),
        priority: Some(priority.to_string()),
    }
}

/// The twenty seed shipments, in collection order.
#[rustfmt::skip]
pub fn seed_shipments() -> Vec<Shipment> {
    const HUB: &str = "Primary Hub";
    const DC: &str = "Regional DC";

    vec![
        shipment("1", "Reliance Industries", 10, "Express", ["Petrochemicals", "Polymers"], 95.5, "Mumbai Hub", "Delhi DC", "HIGH"),
        shipment("2", "Amazon India", 2, "Express", ["Consumer Electronics", "Fashion"], 45.5, HUB, DC, "HIGH"),
        shipment("3", "Flipkart Logistics", 3, "Standard", ["Mobile Phones", "Gadgets"], 100.0, HUB, DC, "NORMAL"),
        shipment("4", "Tata Motors", 12, "Economy", ["Auto Parts", "Steel Rods"], 0.0, "Chennai Port", "Bangalore DC", "NORMAL"),
        shipment("5", "Infosys Ltd", 1, "Standard", ["IT Equipment", "Servers"], 60.0, HUB, DC, "NORMAL"),
        shipment("6", "HDFC Bank", 0, "Express", ["Documents", "Secure Assets"], 100.0, HUB, DC, "HIGH"),
        shipment("7", "Zomato Hyperpure", 1, "Express", ["Groceries", "Organic Produce"], 85.0, HUB, DC, "HIGH"),
        shipment("8", "Maruti Suzuki", 14, "Economy", ["Engine Parts", "Tires"], 10.0, "Gurgaon Warehouse", "Ahmedabad DC", "NORMAL"),
        shipment("9", "L&T Construction", 8, "Standard", ["Heavy Machinery", "Concrete"], 30.0, HUB, DC, "NORMAL"),
        shipment("10", "Wipro Tech", 4, "Express", ["Networking Gear", "Laptops"], 95.0, HUB, DC, "HIGH"),
        shipment("11", "Dr. Reddy Labs", 5, "Standard", ["Medicines", "Pharma API"], 100.0, HUB, DC, "NORMAL"),
        shipment("12", "Asian Paints", 6, "Standard", ["Paints", "Chemicals"], 50.0, HUB, DC, "NORMAL"),
        shipment("13", "Adani Ports", 15, "Economy", ["Coal", "Minerals"], 5.0, HUB, DC, "NORMAL"),
        shipment("14", "Mahindra & Mahindra", 9, "Standard", ["Tractors", "Spare Parts"], 75.0, HUB, DC, "NORMAL"),
        shipment("15", "Airtel Digital", 2, "Express", ["Fiber Cables", "Routers"], 90.0, HUB, DC, "HIGH"),
        shipment("16", "ITC Limited", 4, "Standard", ["FMCG Goods", "Paper"], 100.0, HUB, DC, "NORMAL"),
        shipment("17", "Hero MotoCorp", 7, "Economy", ["Bikes", "Alloy Wheels"], 20.0, HUB, DC, "NORMAL"),
        shipment("18", "Britannia Ind", 3, "Standard", ["Biscuits", "Dairy Goods"], 100.0, HUB, DC, "NORMAL"),
        shipment("19", "ICICI Logistics", 1, "Express", ["Vault Boxes", "Cash"], 98.0, HUB, DC, "HIGH"),
        shipment("20", "Biocon Pharma", 11, "Standard", ["Insulin", "Bio-similars"], 40.0, HUB, DC, "NORMAL"),
    ]
}
