// ABOUTME: Static workout template library shared by every methodology
// ABOUTME: Each template is a named segment list for one workout type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{SegmentKind, WorkoutSegment, WorkoutStructure, WorkoutType};

/// One segment of a template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTemplate {
    /// Segment kind
    pub kind: SegmentKind,
    /// Minutes per repetition
    pub minutes: f64,
    /// Intensity (percent of threshold effort)
    pub intensity: f64,
    /// Repetitions
    pub repetitions: u32,
    /// Description
    pub description: &'static str,
}

/// Library workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutTemplate {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Workout type the template trains
    pub workout_type: WorkoutType,
    /// Ordered segments
    pub segments: &'static [SegmentTemplate],
}

impl WorkoutTemplate {
    /// Total minutes across segments and repetitions
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.minutes * f64::from(s.repetitions.max(1)))
            .sum()
    }

    /// Instantiate the template, scaling the duration of non-warm-up segments
    #[must_use]
    pub fn to_structure(self, duration_scale: f64) -> WorkoutStructure {
        let scale = duration_scale.max(0.0);
        WorkoutStructure {
            name: self.name.to_owned(),
            segments: self
                .segments
                .iter()
                .map(|s| WorkoutSegment {
                    kind: s.kind,
                    duration_minutes: if matches!(s.kind, SegmentKind::WarmUp | SegmentKind::CoolDown) {
                        s.minutes
                    } else {
                        s.minutes * scale
                    },
                    intensity: s.intensity,
                    repetitions: s.repetitions,
                    description: s.description.to_owned(),
                })
                .collect(),
        }
    }
}

const fn seg(
    kind: SegmentKind,
    minutes: f64,
    intensity: f64,
    repetitions: u32,
    description: &'static str,
) -> SegmentTemplate {
    SegmentTemplate {
        kind,
        minutes,
        intensity,
        repetitions,
        description,
    }
}

const WARM_UP: SegmentTemplate = seg(SegmentKind::WarmUp, 15.0, 60.0, 1, "easy warm-up");
const COOL_DOWN: SegmentTemplate = seg(SegmentKind::CoolDown, 10.0, 60.0, 1, "easy cool-down");

/// Every template, grouped by workout type
pub static WORKOUT_LIBRARY: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        id: "easy-45",
        name: "Easy run",
        workout_type: WorkoutType::Easy,
        segments: &[seg(SegmentKind::Steady, 45.0, 65.0, 1, "conversational pace")],
    },
    WorkoutTemplate {
        id: "easy-strides",
        name: "Easy run with strides",
        workout_type: WorkoutType::Easy,
        segments: &[
            seg(SegmentKind::Steady, 40.0, 65.0, 1, "conversational pace"),
            seg(SegmentKind::Interval, 0.3, 78.0, 6, "6 x 20 s relaxed strides"),
        ],
    },
    WorkoutTemplate {
        id: "recovery-30",
        name: "Recovery jog",
        workout_type: WorkoutType::Recovery,
        segments: &[seg(SegmentKind::Steady, 30.0, 55.0, 1, "very easy jog")],
    },
    WorkoutTemplate {
        id: "long-steady",
        name: "Long run",
        workout_type: WorkoutType::LongRun,
        segments: &[seg(SegmentKind::Steady, 90.0, 70.0, 1, "steady aerobic long run")],
    },
    WorkoutTemplate {
        id: "long-fast-finish",
        name: "Long run with fast finish",
        workout_type: WorkoutType::LongRun,
        segments: &[
            seg(SegmentKind::Steady, 80.0, 68.0, 1, "steady aerobic running"),
            seg(SegmentKind::Steady, 15.0, 82.0, 1, "finish at goal race pace"),
        ],
    },
    WorkoutTemplate {
        id: "tempo-20",
        name: "Tempo run",
        workout_type: WorkoutType::Tempo,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Steady, 20.0, 86.0, 1, "20 min comfortably hard"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "threshold-cruise",
        name: "Cruise intervals",
        workout_type: WorkoutType::Threshold,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 8.0, 90.0, 4, "4 x 8 min @ threshold"),
            seg(SegmentKind::Recovery, 1.0, 60.0, 3, "1 min jog"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "threshold-continuous",
        name: "Lactate threshold run",
        workout_type: WorkoutType::Threshold,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Steady, 25.0, 90.0, 1, "25 min @ threshold"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "intervals-1k",
        name: "1 km repeats",
        workout_type: WorkoutType::Intervals,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 4.0, 95.0, 5, "5 x 1 km @ interval pace"),
            seg(SegmentKind::Recovery, 2.0, 55.0, 4, "2 min jog"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "intervals-pyramid",
        name: "Pyramid intervals",
        workout_type: WorkoutType::Intervals,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 3.0, 95.0, 6, "2-3-4-4-3-2 min pyramid"),
            seg(SegmentKind::Recovery, 2.0, 55.0, 5, "2 min jog"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "vo2max-3min",
        name: "VO2max intervals",
        workout_type: WorkoutType::Vo2Max,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 3.0, 100.0, 6, "6 x 3 min @ VO2max"),
            seg(SegmentKind::Recovery, 3.0, 55.0, 5, "3 min jog"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "speed-200",
        name: "200 m repetitions",
        workout_type: WorkoutType::Speed,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 0.7, 105.0, 10, "10 x 200 m fast and relaxed"),
            seg(SegmentKind::Recovery, 1.5, 55.0, 9, "200 m walk/jog"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "hill-repeats",
        name: "Hill repeats",
        workout_type: WorkoutType::Hill,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 1.5, 92.0, 8, "8 x 90 s uphill, strong effort"),
            seg(SegmentKind::Recovery, 2.0, 55.0, 7, "jog back down"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "fartlek-mixed",
        name: "Fartlek",
        workout_type: WorkoutType::Fartlek,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 2.0, 85.0, 8, "8 x 2 min surges"),
            seg(SegmentKind::Recovery, 2.0, 65.0, 8, "2 min float"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "progression-40",
        name: "Progression run",
        workout_type: WorkoutType::Progression,
        segments: &[
            seg(SegmentKind::Steady, 25.0, 70.0, 1, "start easy"),
            seg(SegmentKind::Steady, 15.0, 84.0, 1, "build to marathon effort"),
            seg(SegmentKind::Steady, 5.0, 88.0, 1, "finish at threshold"),
        ],
    },
    WorkoutTemplate {
        id: "race-pace-blocks",
        name: "Race pace blocks",
        workout_type: WorkoutType::RacePace,
        segments: &[
            WARM_UP,
            seg(SegmentKind::Interval, 10.0, 82.0, 3, "3 x 10 min @ goal race pace"),
            seg(SegmentKind::Recovery, 2.0, 60.0, 2, "2 min easy"),
            COOL_DOWN,
        ],
    },
    WorkoutTemplate {
        id: "cross-45",
        name: "Cross-training",
        workout_type: WorkoutType::CrossTraining,
        segments: &[seg(SegmentKind::Steady, 45.0, 60.0, 1, "bike, swim or elliptical")],
    },
    WorkoutTemplate {
        id: "rest-day",
        name: "Rest",
        workout_type: WorkoutType::Rest,
        segments: &[],
    },
];

/// Look up a template by id
#[must_use]
pub fn template(id: &str) -> Option<&'static WorkoutTemplate> {
    WORKOUT_LIBRARY.iter().find(|t| t.id == id)
}

/// Templates for a workout type, in library order
pub fn templates_for(workout_type: WorkoutType) -> impl Iterator<Item = &'static WorkoutTemplate> {
    WORKOUT_LIBRARY
        .iter()
        .filter(move |t| t.workout_type == workout_type)
}

/// Rotate through the templates of a type by week; `None` when the type has no template
#[must_use]
pub fn rotating_template(workout_type: WorkoutType, week: u32) -> Option<&'static WorkoutTemplate> {
    let count = templates_for(workout_type).count();
    if count == 0 {
        return None;
    }
    templates_for(workout_type).nth(usize::try_from(week).unwrap_or(0) % count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_workout_type_has_a_template() {
        for token in "ERLTZIVSHFPMCX".chars() {
            let workout_type = WorkoutType::from_token(token).unwrap();
            assert!(
                templates_for(workout_type).next().is_some(),
                "{workout_type:?} has no template"
            );
        }
    }

    #[test]
    fn test_template_ids_are_unique() {
        for (i, a) in WORKOUT_LIBRARY.iter().enumerate() {
            for b in &WORKOUT_LIBRARY[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_to_structure_keeps_warm_up_length() {
        let tempo = template("tempo-20").unwrap();
        let scaled = tempo.to_structure(2.0);
        assert!((scaled.segments[0].duration_minutes - 15.0).abs() < f64::EPSILON);
        assert!((scaled.segments[1].duration_minutes - 40.0).abs() < f64::EPSILON);
        assert!((scaled.total_minutes() - 65.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotating_template_cycles_by_week() {
        assert_eq!(rotating_template(WorkoutType::Easy, 0).unwrap().id, "easy-45");
        assert_eq!(rotating_template(WorkoutType::Easy, 1).unwrap().id, "easy-strides");
        assert_eq!(rotating_template(WorkoutType::Easy, 2).unwrap().id, "easy-45");
        assert_eq!(rotating_template(WorkoutType::Rest, 7).unwrap().id, "rest-day");
    }
}
