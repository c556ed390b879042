use std::{collections::BTreeMap, fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

use crate::{
    computer::Computer,
    error::{HowMuchCoreError, Result},
    place::Place,
};

/// The two read-only lookup tables the calculator works from.
///
/// Every record is validated on the way in, so lookups always hand back
/// computers and places with finite, positive power and energy figures.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    computers: BTreeMap<String, Computer>,
    places: BTreeMap<String, Place>,
}

impl ReferenceData {
    pub fn new(computers: Vec<Computer>, places: Vec<Place>) -> Result<Self> {
        let mut data = Self::default();
        for computer in computers {
            computer.validate()?;
            if data.computers.contains_key(&computer.name) {
                return Err(HowMuchCoreError::DuplicateName(computer.name));
            }
            data.computers.insert(computer.name.clone(), computer);
        }
        for place in places {
            place.validate()?;
            if data.places.contains_key(&place.name) {
                return Err(HowMuchCoreError::DuplicateName(place.name));
            }
            data.places.insert(place.name.clone(), place);
        }
        log::info!(
            "Loaded reference data: {} computers, {} places",
            data.computers.len(),
            data.places.len()
        );
        Ok(data)
    }

    /// Parses the computer table (`{"name": {"power": .., "tflops": .., ..}}`)
    /// and the place table (`{"name": annual_kwh}`).
    pub fn from_json(computers_json: &str, places_json: &str) -> Result<Self> {
        let Entries(computers) = serde_json::from_str::<Entries<Computer>>(computers_json)?;
        let Entries(places) = serde_json::from_str::<Entries<f64>>(places_json)?;

        let computers = computers
            .into_iter()
            .map(|(name, computer)| Computer { name, ..computer })
            .collect();
        let places = places
            .into_iter()
            .map(|(name, annual_kwh)| Place::new(name, annual_kwh))
            .collect();
        Self::new(computers, places)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_json_files(
        computers_path: impl AsRef<std::path::Path>,
        places_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let computers_json = std::fs::read_to_string(computers_path)?;
        let places_json = std::fs::read_to_string(places_path)?;
        Self::from_json(&computers_json, &places_json)
    }

    pub fn computer(&self, name: &str) -> Result<&Computer> {
        self.computers
            .get(name)
            .ok_or_else(|| HowMuchCoreError::UnknownComputer(name.to_string()))
    }

    pub fn place(&self, name: &str) -> Result<&Place> {
        self.places
            .get(name)
            .ok_or_else(|| HowMuchCoreError::UnknownPlace(name.to_string()))
    }

    pub fn has_computer(&self, name: &str) -> bool {
        self.computers.contains_key(name)
    }

    pub fn has_place(&self, name: &str) -> bool {
        self.places.contains_key(name)
    }

    /// Computer names in sorted order.
    pub fn computer_names(&self) -> impl Iterator<Item = &str> {
        self.computers.keys().map(String::as_str)
    }

    /// Place names in sorted order.
    pub fn place_names(&self) -> impl Iterator<Item = &str> {
        self.places.keys().map(String::as_str)
    }

    pub fn computers(&self) -> impl Iterator<Item = &Computer> {
        self.computers.values()
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }
}

/// The members of a JSON object in document order. Repeated keys are kept so
/// that `ReferenceData::new` can reject them.
struct Entries<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object keyed by record name")
            }

            fn visit_map<A>(self, mut map: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, T>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPUTERS: &str = r#"{
        "Summit": {"power": 10096, "tflops": 148600, "cores": 2414592, "acores": 2211840, "year": 2018, "is_calculated": false},
        "Archer": {"power": 3306.2, "tflops": 1642.5, "cores": 118080, "year": 2014, "is_calculated": true}
    }"#;
    const PLACES: &str = r#"{"United Kingdom": 4000, "France": 5900.5}"#;

    #[test]
    fn test_from_json() {
        let data = ReferenceData::from_json(COMPUTERS, PLACES).unwrap();

        assert_eq!(data.computer_names().collect::<Vec<_>>(), ["Archer", "Summit"]);
        assert_eq!(data.place_names().collect::<Vec<_>>(), ["France", "United Kingdom"]);

        let summit = data.computer("Summit").unwrap();
        assert_eq!(summit.name, "Summit");
        assert_eq!(summit.accelerator_cores, 2_211_840);
        assert!(!summit.is_calculated);

        let archer = data.computer("Archer").unwrap();
        assert_eq!(archer.accelerator_cores, 0);
        assert!(archer.is_calculated);

        assert_eq!(data.place("United Kingdom").unwrap().annual_kwh, 4000.0);
    }

    #[test]
    fn test_unknown_lookups() {
        let data = ReferenceData::from_json(COMPUTERS, PLACES).unwrap();
        assert!(matches!(
            data.computer("Fugaku"),
            Err(HowMuchCoreError::UnknownComputer(name)) if name == "Fugaku"
        ));
        assert!(matches!(
            data.place("Atlantis"),
            Err(HowMuchCoreError::UnknownPlace(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_records_at_load() {
        let zero_power = r#"{"Bad": {"power": 0, "tflops": 10, "year": 2020}}"#;
        assert!(matches!(
            ReferenceData::from_json(zero_power, PLACES),
            Err(HowMuchCoreError::NonPositiveValue { field: "power", .. })
        ));

        let negative_home = r#"{"Nowhere": -12}"#;
        assert!(matches!(
            ReferenceData::from_json(COMPUTERS, negative_home),
            Err(HowMuchCoreError::NonPositiveValue { field: "annual_kwh", .. })
        ));

        assert!(matches!(
            ReferenceData::from_json("[1, 2]", PLACES),
            Err(HowMuchCoreError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = ReferenceData::new(
            vec![
                Computer::new("Twin", 1.0, 1.0, 2020),
                Computer::new("Twin", 2.0, 2.0, 2021),
            ],
            vec![],
        );
        assert!(matches!(result, Err(HowMuchCoreError::DuplicateName(name)) if name == "Twin"));
    }

    #[test]
    fn test_rejects_repeated_json_keys() {
        let twin_computers = r#"{
            "Twin": {"power": 1, "tflops": 1, "year": 2020},
            "Twin": {"power": 5, "tflops": 5, "year": 2021}
        }"#;
        assert!(matches!(
            ReferenceData::from_json(twin_computers, PLACES),
            Err(HowMuchCoreError::DuplicateName(name)) if name == "Twin"
        ));

        let twin_places = r#"{"United Kingdom": 4000, "United Kingdom": 9999}"#;
        assert!(matches!(
            ReferenceData::from_json(COMPUTERS, twin_places),
            Err(HowMuchCoreError::DuplicateName(name)) if name == "United Kingdom"
        ));
    }

    #[test]
    fn test_rejects_custom_label_as_record_name() {
        let shadow = r#"{"A custom supercomputer": {"power": 1000, "tflops": 1000, "year": 2020}}"#;
        assert!(matches!(
            ReferenceData::from_json(shadow, PLACES),
            Err(HowMuchCoreError::ReservedName(_))
        ));
    }
}
