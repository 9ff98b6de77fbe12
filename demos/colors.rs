use std::collections::HashMap;

use randomizer::{Randomizer, WeightedEntry, WeightedEnum};

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, WeightedEnum)]
enum Rarity {
    #[weight(1/1000)]
    Mythic,
    #[weight(1/100)]
    Legendary,
    #[weight(20/100)]
    Uncommon,
    #[weight(50/100)]
    Common,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut colours = Randomizer::secure();
    colours
        .add(1.6, "Red")?
        .add(4.4, "Green")?
        .add_many([(14.0, "Blue")])?
        .add_entries([WeightedEntry::new(0.5, "Black")])?
        .prepare()?;

    let mut hist: HashMap<&str, u64> = HashMap::default();
    for colour in colours.sample_many(100_000)? {
        *hist.entry(*colour).or_default() += 1;
    }
    print_hist("Colours:", hist);

    let rarity = Rarity::sampler()?;
    let mut hist: HashMap<Rarity, u64> = HashMap::default();
    for r in rarity.sample_iter().take(200_000) {
        *hist.entry(*r).or_default() += 1;
    }
    print_hist("\nRarity:", hist);

    Ok(())
}

fn print_hist<K: std::fmt::Debug>(title: &str, hist: HashMap<K, u64>) {
    println!("{title}");
    let mut v: Vec<_> = hist.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (k, c) in v {
        println!("{c:>6} {k:?}");
    }
}
