pub mod final_primers;
