mod editing;
mod help_and_blank;
