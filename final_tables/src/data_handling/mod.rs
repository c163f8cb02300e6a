pub mod primer_pairs;
