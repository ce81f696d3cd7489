//! A 63-bit genome scored by 4-bit quartets.
//!
//! Used by the `quartets` binary, the benchmarks and the tests as a
//! concrete instantiation of [`GaProblem`]. Genomes are `u64` values whose
//! top bit is always clear.
//!
//! Fitness splits the genome into 16 quartets (the last one only 3 bits
//! wide). An all-zero quartet scores 5; otherwise a quartet scores its
//! number of set bits. The all-zero genome is the unique optimum with
//! [`MAX_FITNESS`] = 80, yet within a non-empty quartet every extra set bit
//! scores higher, so the landscape is deceptive.

use super::types::GaProblem;
use rand::Rng;

/// Number of bits in a genome.
pub const GENOME_BITS: u32 = 63;

/// Mask of the bits a genome may use.
pub const GENOME_MASK: u64 = (1u64 << GENOME_BITS) - 1;

/// Number of quartets a genome is split into.
pub const QUARTETS: u32 = GENOME_BITS.div_ceil(4);

/// Score of the all-zero genome.
pub const MAX_FITNESS: u32 = QUARTETS * 5;

// Indexed by the quartet's number of set bits.
const REWARD: [u32; 5] = [5, 1, 2, 3, 4];

/// Quartet fitness of a genome. Bits above [`GENOME_BITS`] are ignored.
pub fn quartet_fitness(genome: u64) -> u32 {
    let genome = genome & GENOME_MASK;
    (0..QUARTETS)
        .map(|q| REWARD[((genome >> (4 * q)) & 0xF).count_ones() as usize])
        .sum()
}

/// Single-point crossover: bits below `cut` come from `low`, the rest from
/// `high`.
pub fn single_point_crossover(low: u64, high: u64, cut: u32) -> u64 {
    let low_mask = if cut >= GENOME_BITS {
        GENOME_MASK
    } else {
        (1u64 << cut) - 1
    };
    ((low & low_mask) | (high & !low_mask)) & GENOME_MASK
}

/// Flips bit `index` of a genome.
pub fn flip_bit(genome: u64, index: u32) -> u64 {
    (genome ^ (1u64 << (index % GENOME_BITS))) & GENOME_MASK
}

/// A uniformly random genome.
pub fn random_genome<R: Rng>(rng: &mut R) -> u64 {
    rng.random::<u64>() & GENOME_MASK
}

/// `size` uniformly random genomes.
pub fn random_population<R: Rng>(size: usize, rng: &mut R) -> Vec<u64> {
    (0..size).map(|_| random_genome(rng)).collect()
}

/// Quartet-scored 63-bit genome problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuartetProblem;

impl GaProblem for QuartetProblem {
    type Individual = u64;
    type Score = u32;

    fn fitness(&self, genome: &u64) -> u32 {
        quartet_fitness(*genome)
    }

    fn crossbreed<R: Rng>(&self, parent_a: &u64, parent_b: &u64, rng: &mut R) -> u64 {
        let cut = rng.random_range(0..GENOME_BITS);
        single_point_crossover(*parent_a, *parent_b, cut)
    }

    fn mutate<R: Rng>(&self, genome: &u64, rng: &mut R) -> u64 {
        flip_bit(*genome, rng.random_range(0..GENOME_BITS))
    }
}
