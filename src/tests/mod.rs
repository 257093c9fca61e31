
mod dialog;
