pub mod cartoonize;
