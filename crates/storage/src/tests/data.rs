use std::sync::LazyLock;

use chrono::NaiveDate;
use circuit_domain as domain;

pub static KB_PRESS: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 1.into(),
    name: domain::Name::new("Kettlebell Press").unwrap(),
    link: String::from("https://example.org/kettlebell-press"),
    area: domain::Area::Upper,
    muscles: ["shoulders", "triceps"].into_iter().map(String::from).collect(),
    equipment: [("kb16".into(), 1)].into_iter().collect(),
    laterality: domain::Laterality::Bilateral,
    category: domain::Category::Strength,
});

pub static GOBLET_SQUAT: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 2.into(),
    name: domain::Name::new("Goblet Squat").unwrap(),
    link: String::new(),
    area: domain::Area::Lower,
    muscles: ["quads"].into_iter().map(String::from).collect(),
    equipment: [("kb16".into(), 1)].into_iter().collect(),
    laterality: domain::Laterality::Bilateral,
    category: domain::Category::Strength,
});

pub static LUNGE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 3.into(),
    name: domain::Name::new("Lunge").unwrap(),
    link: String::new(),
    area: domain::Area::Lower,
    muscles: ["glutes", "quads"].into_iter().map(String::from).collect(),
    equipment: domain::Demand::default(),
    laterality: domain::Laterality::Unilateral,
    category: domain::Category::Strength,
});

pub static PLANK: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 4.into(),
    name: domain::Name::new("Plank").unwrap(),
    link: String::new(),
    area: domain::Area::Core,
    muscles: std::collections::BTreeSet::new(),
    equipment: domain::Demand::default(),
    laterality: domain::Laterality::Bilateral,
    category: domain::Category::Strength,
});

pub static STRETCH: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 31.into(),
    name: domain::Name::new("World's Greatest Stretch").unwrap(),
    link: String::new(),
    area: domain::Area::Core,
    muscles: std::collections::BTreeSet::new(),
    equipment: domain::Demand::default(),
    laterality: domain::Laterality::Bilateral,
    category: domain::Category::Mobility,
});

pub const KETTLEBELL_JSON: &str = r#"{
  "lifts": {
    "press": [
      {
        "id": 1,
        "name": "Kettlebell Press",
        "link": "https://example.org/kettlebell-press",
        "area": "upper",
        "muscles": "shoulders, triceps",
        "equipment": { "kb16": { "count": 1 } }
      },
      { "id": 9, "name": "Kettlebell Snatch", "area": "upper", "skip": true }
    ],
    "squat": [
      {
        "id": 2,
        "name": "Goblet Squat",
        "area": "lower",
        "muscles": "quads",
        "equipment": { "kb16": {} }
      }
    ]
  }
}"#;

pub const BODYWEIGHT_JSON: &str = r#"{
  "lifts": {
    "legs": [
      { "id": 3, "name": "Lunge", "area": "lower", "muscles": "quads,glutes", "unilateral": true }
    ],
    "core": [
      { "id": 4, "name": "Plank" }
    ]
  }
}"#;

pub const ACTIVE_REST_JSON: &str = r#"{
  "rest": [
    { "id": 31, "name": "World's Greatest Stretch" },
    { "id": 32, "name": "Burpee", "skip": true }
  ]
}"#;

pub const PLAN_JSON: &str = r#"{
  "title": "Garage Circuit",
  "stations": 2,
  "steps_per_station": 2,
  "rounds": 4,
  "timing": "40/20",
  "balance_order": ["upper", "lower"],
  "active_rest": true,
  "active_rest_count": 1,
  "equipment": { "kb16": { "count": 2 }, "box": {} },
  "must_use": ["kb16"]
}"#;

pub fn config() -> domain::Config {
    domain::Config {
        constraints: domain::Constraints {
            title: String::from("Garage Circuit"),
            stations: 2,
            steps_per_station: 2,
            rounds: 4,
            timing: domain::Timing { work: 40, rest: 20 },
            balance_order: vec![domain::Area::Upper, domain::Area::Lower],
            must_use_equipment: ["kb16".into()].into_iter().collect(),
            active_rest: domain::ActiveRestMode::Active,
            active_rest_count: 1,
            ..domain::Constraints::default()
        },
        inventory: [("kb16".into(), 2), ("box".into(), 0)].into_iter().collect(),
    }
}

pub fn plan() -> domain::WorkoutPlan {
    domain::WorkoutPlan {
        stations: vec![
            domain::Station {
                area: domain::Area::Upper,
                exercises: vec![KB_PRESS.id, PLANK.id],
                footprint: KB_PRESS.equipment.clone(),
            },
            domain::Station {
                area: domain::Area::Lower,
                exercises: vec![GOBLET_SQUAT.id, LUNGE.id],
                footprint: GOBLET_SQUAT.equipment.clone(),
            },
        ],
        active_rest: domain::ActiveRest {
            mode: domain::ActiveRestMode::Mix,
            exercises: vec![STRETCH.id],
            schedule: vec![Some(STRETCH.id), None],
        },
        constraints: config().constraints,
        seed: 42,
        attempts: 2,
        created: NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap(),
        edits: vec![domain::EditRecord {
            seed: 7,
            replacements: vec![(LUNGE.id, PLANK.id)],
        }],
    }
}
