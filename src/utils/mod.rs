pub mod natural_sort;
