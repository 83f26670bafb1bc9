use design_loads::prelude::*;

const ROOF: &str = r#"{
    "load_cases": [
        { "label": "G1", "load_type": "permanent", "load_duration_class": "permanent" },
        { "label": "G2", "load_type": "permanent", "load_duration_class": "permanent" },
        { "label": "Q1", "load_type": "variable", "category": "category a", "load_duration_class": "medium-term" },
        { "label": "Q2", "load_type": "variable", "category": "category b", "load_duration_class": "medium-term" },
        { "label": "S1", "load_type": "variable", "category": "snow < 1000 m", "load_duration_class": "short-term" },
        { "label": "S2", "load_type": "variable", "category": "snow < 1000 m", "load_duration_class": "short-term" },
        { "label": "W1", "load_type": "variable", "category": "wind", "load_duration_class": "instantaneous" },
        { "label": "W2", "load_type": "variable", "category": "wind", "load_duration_class": "instantaneous" }
    ],
    "groups": [
        { "name": "LG1", "relation": "together", "load_cases": ["G1", "G2"] },
        { "name": "LG2", "relation": "standard", "load_cases": ["Q1", "Q2"] },
        { "name": "LG3", "relation": "exclusive", "load_cases": ["S1", "S2"] },
        { "name": "LG4", "relation": "exclusive", "load_cases": ["W1", "W2"] }
    ],
    "group_sets": [["LG1", "LG2"], ["LG1", "LG3", "LG4"]]
}"#;

#[test]
fn test_catalogue_group_sets() {
    let catalogue = LoadCatalogue::from_json(ROOF).unwrap();
    let sets = catalogue.group_sets().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].len(), 2);
    assert_eq!(sets[1].len(), 3);
}

#[test]
fn test_catalogue_generation_never_mixes_sets() {
    let catalogue = LoadCatalogue::from_json(ROOF).unwrap();
    let combos = catalogue
        .generate(LimitState::Sls, CombinationType::Characteristic)
        .unwrap();

    // Set 1: [G], [G,Q1], [G,Q2], [G,Q1,Q2] -> 1 + 1 + 1 + 2
    // Set 2: 3 snow x 3 wind selections, [G] already seen -> 2 + 2 + 2 * 4
    assert_eq!(combos.len(), 5 + 12);

    for combination in &combos {
        let imposed = combination.includes("Q1") || combination.includes("Q2");
        let climatic = ["S1", "S2", "W1", "W2"]
            .iter()
            .any(|label| combination.includes(label));
        assert!(!(imposed && climatic), "{}", combination);
    }
}

#[test]
fn test_catalogue_into_generator_with_tables() {
    let catalogue = LoadCatalogue::from_json(ROOF).unwrap();
    let mut tables = FactorTables::eurocode();
    tables.xi = 1.0;
    let mut generator = CombinationsGenerator::new(LimitState::Uls, CombinationType::Alternative)
        .unwrap()
        .with_factors(tables);

    let count = catalogue.generate_into(&mut generator).unwrap();
    assert_eq!(count, 2 * (5 + 12));
    assert_eq!(
        generator.combinations()[1].combination_key(),
        "1.0*1.35*G1+1.0*1.35*G2"
    );
}

#[test]
fn test_catalogue_rejects_unknown_category() {
    let json = ROOF.replace("\"category b\"", "\"category x\"");
    assert!(matches!(
        LoadCatalogue::from_json(&json),
        Err(DesignError::SerializationError(_))
    ));
}

#[test]
fn test_catalogue_rejects_duplicate_case_in_group() {
    let json = ROOF.replace("[\"S1\", \"S2\"]", "[\"S1\", \"S1\"]");
    assert!(matches!(
        LoadCatalogue::from_json(&json),
        Err(DesignError::DuplicateName(label)) if label == "S1"
    ));
}
