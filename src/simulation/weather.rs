//! Seasonal weather. Each update is a fresh roll with no memory of the last.

use bevy_ecs::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Normal,
    Drought,
    HarshWinter,
    GoodWeather,
}

impl WeatherCondition {
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..60 => WeatherCondition::Normal,
            60..75 => WeatherCondition::Drought,
            75..90 => WeatherCondition::HarshWinter,
            _ => WeatherCondition::GoodWeather,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Normal => "Normal",
            WeatherCondition::Drought => "Drought",
            WeatherCondition::HarshWinter => "Harsh Winter",
            WeatherCondition::GoodWeather => "Good Weather",
        }
    }

    pub fn food_production_multiplier(&self) -> f64 {
        match self {
            WeatherCondition::Normal => 1.0,
            WeatherCondition::Drought => 0.5,
            WeatherCondition::HarshWinter => 0.3,
            WeatherCondition::GoodWeather => 1.5,
        }
    }

    pub fn is_harsh(&self) -> bool {
        matches!(
            self,
            WeatherCondition::Drought | WeatherCondition::HarshWinter
        )
    }

    fn roll_duration(&self, rng: &mut impl Rng) -> u32 {
        match self {
            WeatherCondition::Normal => 0,
            WeatherCondition::Drought => rng.gen_range(1..=3),
            WeatherCondition::HarshWinter | WeatherCondition::GoodWeather => rng.gen_range(1..=2),
        }
    }
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Weather {
    current_condition: WeatherCondition,
    /// Informational only; nothing counts it down.
    duration: u32,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            current_condition: WeatherCondition::Normal,
            duration: 0,
        }
    }
}

impl Weather {
    pub fn current_condition(&self) -> WeatherCondition {
        self.current_condition
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn food_production_multiplier(&self) -> f64 {
        self.current_condition.food_production_multiplier()
    }

    pub fn is_harsh(&self) -> bool {
        self.current_condition.is_harsh()
    }

    pub fn update_weather(&mut self, rng: &mut impl Rng) -> WeatherCondition {
        let roll = rng.gen_range(0..100);
        self.apply_roll(roll, rng)
    }

    /// Sets the condition for `roll` in `[0, 100)`; `rng` only picks the duration.
    pub fn apply_roll(&mut self, roll: u32, rng: &mut impl Rng) -> WeatherCondition {
        let condition = WeatherCondition::from_roll(roll);
        self.current_condition = condition;
        self.duration = condition.roll_duration(rng);
        condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn fixed_rolls_pick_each_condition() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut weather = Weather::default();
        let cases = [
            (10, WeatherCondition::Normal, 1.0, false),
            (70, WeatherCondition::Drought, 0.5, true),
            (80, WeatherCondition::HarshWinter, 0.3, true),
            (95, WeatherCondition::GoodWeather, 1.5, false),
        ];
        for (roll, condition, multiplier, harsh) in cases {
            assert_eq!(weather.apply_roll(roll, &mut rng), condition);
            assert_eq!(weather.food_production_multiplier(), multiplier);
            assert_eq!(weather.is_harsh(), harsh);
        }
    }

    #[test]
    fn durations_stay_in_band() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut weather = Weather::default();
        for _ in 0..50 {
            weather.apply_roll(10, &mut rng);
            assert_eq!(weather.duration(), 0);
            weather.apply_roll(65, &mut rng);
            assert!((1..=3).contains(&weather.duration()));
            weather.apply_roll(80, &mut rng);
            assert!((1..=2).contains(&weather.duration()));
            weather.apply_roll(99, &mut rng);
            assert!((1..=2).contains(&weather.duration()));
        }
    }
}
