// SI unit-conversion tables
//
// The simulation core is unit-agnostic: positions, step_size and the
// distance accumulators are plain numbers. Callers that want real units
// scale their inputs/outputs with these factor tables.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Millimeters,
    Centimeters,
    Meters,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 3] = [
        DistanceUnit::Millimeters,
        DistanceUnit::Centimeters,
        DistanceUnit::Meters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Millimeters => "millimeters",
            DistanceUnit::Centimeters => "centimeters",
            DistanceUnit::Meters => "meters",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "millimeters" => Some(DistanceUnit::Millimeters),
            "centimeters" => Some(DistanceUnit::Centimeters),
            "meters" => Some(DistanceUnit::Meters),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "nanoseconds" => Some(TimeUnit::Nanoseconds),
            "microseconds" => Some(TimeUnit::Microseconds),
            "milliseconds" => Some(TimeUnit::Milliseconds),
            "seconds" => Some(TimeUnit::Seconds),
            "minutes" => Some(TimeUnit::Minutes),
            "hours" => Some(TimeUnit::Hours),
            _ => None,
        }
    }
}

/// One distance unit expressed in every distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiDistance {
    pub millimeters: f64,
    pub centimeters: f64,
    pub meters: f64,
}

impl SiDistance {
    pub fn get(&self, unit: DistanceUnit) -> f64 {
        match unit {
            DistanceUnit::Millimeters => self.millimeters,
            DistanceUnit::Centimeters => self.centimeters,
            DistanceUnit::Meters => self.meters,
        }
    }
}

/// One time unit expressed in every time unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiTime {
    pub nanoseconds: f64,
    pub microseconds: f64,
    pub milliseconds: f64,
    pub seconds: f64,
    pub minutes: f64,
    pub hours: f64,
}

impl SiTime {
    pub fn get(&self, unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Nanoseconds => self.nanoseconds,
            TimeUnit::Microseconds => self.microseconds,
            TimeUnit::Milliseconds => self.milliseconds,
            TimeUnit::Seconds => self.seconds,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Hours => self.hours,
        }
    }
}

pub static DISTANCE_FACTORS: Lazy<HashMap<DistanceUnit, SiDistance>> = Lazy::new(|| {
    use DistanceUnit::*;
    let mut m = HashMap::new();

    m.insert(
        Millimeters,
        SiDistance {
            millimeters: 1.0,
            centimeters: 0.1,
            meters: 0.001,
        },
    );
    m.insert(
        Centimeters,
        SiDistance {
            millimeters: 10.0,
            centimeters: 1.0,
            meters: 0.01,
        },
    );
    m.insert(
        Meters,
        SiDistance {
            millimeters: 1000.0,
            centimeters: 100.0,
            meters: 1.0,
        },
    );

    m
});

pub static TIME_FACTORS: Lazy<HashMap<TimeUnit, SiTime>> = Lazy::new(|| {
    use TimeUnit::*;
    let mut m = HashMap::new();

    m.insert(
        Nanoseconds,
        SiTime {
            nanoseconds: 1.0,
            microseconds: 0.001,
            milliseconds: 1.0e-6,
            seconds: 1.0e-9,
            minutes: 1.6666666666666667e-11,
            hours: 2.777777777777778e-13,
        },
    );
    m.insert(
        Microseconds,
        SiTime {
            nanoseconds: 1000.0,
            microseconds: 1.0,
            milliseconds: 0.001,
            seconds: 1.0e-6,
            minutes: 1.6666666666666667e-8,
            hours: 2.777777777777778e-10,
        },
    );
    m.insert(
        Milliseconds,
        SiTime {
            nanoseconds: 1.0e6,
            microseconds: 1000.0,
            milliseconds: 1.0,
            seconds: 0.001,
            minutes: 1.6666666666666667e-5,
            hours: 2.777777777777778e-7,
        },
    );
    m.insert(
        Seconds,
        SiTime {
            nanoseconds: 1.0e9,
            microseconds: 1.0e6,
            milliseconds: 1000.0,
            seconds: 1.0,
            minutes: 0.016666666666666666,
            hours: 0.0002777777777777778,
        },
    );
    m.insert(
        Minutes,
        SiTime {
            nanoseconds: 6.0e10,
            microseconds: 6.0e7,
            milliseconds: 60_000.0,
            seconds: 60.0,
            minutes: 1.0,
            hours: 0.016666666666666666,
        },
    );
    m.insert(
        Hours,
        SiTime {
            nanoseconds: 3.6e12,
            microseconds: 3.6e9,
            milliseconds: 3.6e6,
            seconds: 3600.0,
            minutes: 60.0,
            hours: 1.0,
        },
    );

    m
});

/// Conversion factors for one distance unit
pub fn distance_factors(unit: DistanceUnit) -> &'static SiDistance {
    &DISTANCE_FACTORS[&unit]
}

/// Conversion factors for one time unit
pub fn time_factors(unit: TimeUnit) -> &'static SiTime {
    &TIME_FACTORS[&unit]
}

pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    value * distance_factors(from).get(to)
}

pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    value * time_factors(from).get(to)
}

/// Factor converting a velocity in `from_d/from_t` into `to_d/to_t`
pub fn velocity_factor(
    from_d: DistanceUnit,
    from_t: TimeUnit,
    to_d: DistanceUnit,
    to_t: TimeUnit,
) -> f64 {
    distance_factors(from_d).get(to_d) / time_factors(from_t).get(to_t)
}
