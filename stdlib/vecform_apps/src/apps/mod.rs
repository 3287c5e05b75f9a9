//! The bundled deployments

pub mod car_price;
pub mod dengue;
pub mod kidney_stone;
pub mod typhoid;

pub use car_price::CarPrice;
pub use dengue::Dengue;
pub use kidney_stone::KidneyStone;
pub use typhoid::Typhoid;

use crate::deployment::Deployment;

pub fn all() -> Vec<Box<dyn Deployment>> {
    vec![
        Box::new(Dengue::new()),
        Box::new(Typhoid::new()),
        Box::new(KidneyStone::new()),
        Box::new(CarPrice::new()),
    ]
}

pub fn find(id: &str) -> Option<Box<dyn Deployment>> {
    all().into_iter().find(|d| d.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_findable() {
        let ids: Vec<&str> = all().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["dengue", "typhoid", "kidney-stone", "car-price"]);
        for id in ids {
            assert_eq!(find(id).map(|d| d.id()), Some(id));
        }
        assert!(find("malaria").is_none());
    }
}
