mod controls;
mod details;
mod editor;
mod inspector;
mod panels;
