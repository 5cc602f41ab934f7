pub mod inscriptions;
