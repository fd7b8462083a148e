pub mod faker;
