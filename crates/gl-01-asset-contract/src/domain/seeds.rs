//! Demonstration records written by `InitLedger`.

use shared_types::Garment;

/// The six fixed records seeded at deployment, each tagged `DocType = "garment"`.
pub fn seed_garments() -> Vec<Garment> {
    [
        ("garment1", "blue", 5, "A", 300),
        ("garment2", "red", 5, "B", 400),
        ("garment3", "green", 10, "A", 500),
        ("garment4", "yellow", 10, "C", 600),
        ("garment5", "black", 15, "A", 700),
        ("garment6", "white", 15, "D", 800),
    ]
    .into_iter()
    .map(|(id, color, size, owner, value)| {
        Garment::new(id, color, size as u64, owner, value as u64).tagged()
    })
    .collect()
}
