use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::{
    ActiveRest, ActiveRestMode, Area, Catalog, Category, Constraints, Exercise, Inventory,
    Laterality, Name, Station, WorkoutPlan,
};

fn exercise(
    id: u32,
    name: &str,
    area: Area,
    muscles: &[&str],
    equipment: &[(&str, u32)],
    laterality: Laterality,
    category: Category,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: Name::new(name).unwrap(),
        link: format!("https://example.org/{}", name.to_lowercase().replace(' ', "-")),
        area,
        muscles: muscles.iter().map(ToString::to_string).collect(),
        equipment: equipment.iter().map(|(e, c)| ((*e).into(), *c)).collect(),
        laterality,
        category,
    }
}

pub fn strength(id: u32, name: &str, area: Area, equipment: &[(&str, u32)]) -> Exercise {
    exercise(
        id,
        name,
        area,
        &[],
        equipment,
        Laterality::Bilateral,
        Category::Strength,
    )
}

fn mobility(id: u32, name: &str) -> Exercise {
    exercise(
        id,
        name,
        Area::Core,
        &[],
        &[],
        Laterality::Bilateral,
        Category::Mobility,
    )
}

pub static INVENTORY: LazyLock<Inventory> = LazyLock::new(|| {
    [
        ("kb16", 4),
        ("bench", 1),
        ("box", 1),
        ("db10", 2),
        ("slam_ball", 2),
        ("band", 2),
        ("rings", 2),
    ]
    .into_iter()
    .map(|(e, c)| (e.into(), c))
    .collect()
});

pub static KB_PRESS: LazyLock<Exercise> = LazyLock::new(|| {
    exercise(
        1,
        "Kettlebell Press",
        Area::Upper,
        &["shoulders", "triceps"],
        &[("kb16", 1)],
        Laterality::Bilateral,
        Category::Strength,
    )
});
pub static PUSH_UP: LazyLock<Exercise> =
    LazyLock::new(|| strength(2, "Push Up", Area::Upper, &[]));
pub static DB_BENCH_PRESS: LazyLock<Exercise> = LazyLock::new(|| {
    strength(
        3,
        "Dumbbell Bench Press",
        Area::Upper,
        &[("bench", 1), ("db10", 2)],
    )
});
pub static BAND_PULL_APART: LazyLock<Exercise> =
    LazyLock::new(|| strength(4, "Band Pull Apart", Area::Upper, &[("band", 1)]));
pub static KB_ROW: LazyLock<Exercise> = LazyLock::new(|| {
    exercise(
        5,
        "Kettlebell Row",
        Area::Upper,
        &["lats"],
        &[("kb16", 1)],
        Laterality::Unilateral,
        Category::Strength,
    )
});

pub static GOBLET_SQUAT: LazyLock<Exercise> =
    LazyLock::new(|| strength(11, "Goblet Squat", Area::Lower, &[("kb16", 1)]));
pub static BOX_JUMP: LazyLock<Exercise> =
    LazyLock::new(|| strength(12, "Box Jump", Area::Lower, &[("box", 1)]));
pub static LUNGE: LazyLock<Exercise> = LazyLock::new(|| {
    exercise(
        13,
        "Lunge",
        Area::Lower,
        &["quads", "glutes"],
        &[],
        Laterality::Unilateral,
        Category::Strength,
    )
});
pub static KB_SWING: LazyLock<Exercise> =
    LazyLock::new(|| strength(14, "Kettlebell Swing", Area::Lower, &[("kb24", 1)]));
pub static STEP_UP: LazyLock<Exercise> =
    LazyLock::new(|| strength(15, "Step Up", Area::Lower, &[("box", 1)]));

pub static PLANK: LazyLock<Exercise> = LazyLock::new(|| strength(21, "Plank", Area::Core, &[]));
pub static SLAM_BALL: LazyLock<Exercise> =
    LazyLock::new(|| strength(22, "Slam Ball", Area::Core, &[("slam_ball", 1)]));
pub static DEAD_BUG: LazyLock<Exercise> =
    LazyLock::new(|| strength(23, "Dead Bug", Area::Core, &[]));
pub static SUITCASE_CARRY: LazyLock<Exercise> = LazyLock::new(|| {
    exercise(
        24,
        "Suitcase Carry",
        Area::Core,
        &[],
        &[("kb16", 1)],
        Laterality::Unilateral,
        Category::Strength,
    )
});
pub static RUSSIAN_TWIST: LazyLock<Exercise> =
    LazyLock::new(|| strength(25, "Russian Twist", Area::Core, &[("slam_ball", 1)]));

pub static WORLD_GREATEST_STRETCH: LazyLock<Exercise> =
    LazyLock::new(|| mobility(31, "World's Greatest Stretch"));
pub static JUMPING_JACKS: LazyLock<Exercise> = LazyLock::new(|| mobility(32, "Jumping Jacks"));
pub static CAT_COW: LazyLock<Exercise> = LazyLock::new(|| mobility(33, "Cat Cow"));
pub static ARM_CIRCLES: LazyLock<Exercise> = LazyLock::new(|| mobility(34, "Arm Circles"));

pub static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(
        [
            &KB_PRESS,
            &PUSH_UP,
            &DB_BENCH_PRESS,
            &BAND_PULL_APART,
            &KB_ROW,
            &GOBLET_SQUAT,
            &BOX_JUMP,
            &LUNGE,
            &KB_SWING,
            &STEP_UP,
            &PLANK,
            &SLAM_BALL,
            &DEAD_BUG,
            &SUITCASE_CARRY,
            &RUSSIAN_TWIST,
            &WORLD_GREATEST_STRETCH,
            &JUMPING_JACKS,
            &CAT_COW,
            &ARM_CIRCLES,
        ]
        .into_iter()
        .map(|e| Exercise::clone(e)),
    )
    .unwrap()
});

pub fn constraints() -> Constraints {
    Constraints {
        stations: 3,
        steps_per_station: 2,
        active_rest: ActiveRestMode::Active,
        active_rest_count: 2,
        ..Constraints::default()
    }
}

pub fn plan() -> WorkoutPlan {
    WorkoutPlan {
        stations: vec![
            Station {
                area: Area::Upper,
                exercises: vec![KB_PRESS.id, PUSH_UP.id],
                footprint: KB_PRESS.equipment.clone(),
            },
            Station {
                area: Area::Lower,
                exercises: vec![GOBLET_SQUAT.id, LUNGE.id],
                footprint: GOBLET_SQUAT.equipment.clone(),
            },
            Station {
                area: Area::Core,
                exercises: vec![PLANK.id, SLAM_BALL.id],
                footprint: SLAM_BALL.equipment.clone(),
            },
        ],
        active_rest: ActiveRest {
            mode: ActiveRestMode::Active,
            exercises: vec![WORLD_GREATEST_STRETCH.id, CAT_COW.id],
            schedule: vec![Some(WORLD_GREATEST_STRETCH.id), Some(CAT_COW.id)],
        },
        constraints: constraints(),
        seed: 42,
        attempts: 1,
        created: NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap(),
        edits: vec![],
    }
}
