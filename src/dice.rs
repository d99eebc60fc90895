use rand::Rng;
use serde::{Deserialize, Serialize};

/// A die or a composite of dice rolled together and summed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Dice {
    Regular { sides: u8 },
    Multi { dice: Vec<Dice> },
}

impl Dice {
    pub fn regular(sides: u8) -> Self {
        Dice::Regular { sides }
    }

    /// The standard pair of six-sided dice, rolling 2..=12.
    pub fn two_d6() -> Self {
        Dice::Multi {
            dice: vec![Dice::regular(6), Dice::regular(6)],
        }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u8 {
        match self {
            Dice::Regular { sides } => rng.gen_range(1..=*sides),
            Dice::Multi { dice } => dice.iter().map(|die| die.roll(rng)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn regular_die_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let die = Dice::regular(6);
        for _ in 0..200 {
            let roll = die.roll(&mut rng);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn two_d6_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let dice = Dice::two_d6();
        for _ in 0..200 {
            let roll = dice.roll(&mut rng);
            assert!((2..=12).contains(&roll));
        }
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let dice = Dice::two_d6();
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        let a: Vec<u8> = (0..32).map(|_| dice.roll(&mut first)).collect();
        let b: Vec<u8> = (0..32).map(|_| dice.roll(&mut second)).collect();
        assert_eq!(a, b);
    }
}
