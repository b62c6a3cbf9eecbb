mod command;
mod parameter;
