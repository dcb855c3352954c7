extern crate rand;
extern crate succinct_trie;

use mem_dbg::{MemSize, SizeFlags};
use rand::{Rng, SeedableRng, StdRng};
use succinct_trie::{DirectoryConfig, FrozenTrie, Trie};

fn generate_random_trie(n: usize, max_len: usize) -> FrozenTrie {
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
    let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
    let mut trie = Trie::new();
    for _ in 0..n {
        let len = rng.gen_range(1, max_len + 1);
        let word: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0, alphabet.len())])
            .collect();
        trie.insert(&word).unwrap();
    }
    trie.freeze(DirectoryConfig::default()).unwrap()
}

fn main() {
    let test_cases = &[(10_000, 8), (10_000, 16), (100_000, 8), (100_000, 16), (1_000_000, 12)];

    println!("n: # of words, len: max word length\n");

    for &(n, len) in test_cases {
        let ft = generate_random_trie(n, len);
        let trie = ft.data().mem_size(SizeFlags::empty());
        let directory = ft.directory().directory().mem_size(SizeFlags::empty());
        let nodes = ft.node_count();
        let rate = ((trie + directory) * 8) as f64 / nodes as f64;
        println!(
            "n = {}, len = {}: {} nodes, {} + {} bytes ({} bit / node)",
            n, len, nodes, trie, directory, rate
        );
    }
}
