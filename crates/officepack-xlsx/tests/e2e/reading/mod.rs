mod cells;
mod container;
mod layout;
