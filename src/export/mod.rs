pub mod tables;

pub use tables::{
    CsvExport, RosterPlayerRow, TeamRow, export_league_to_csv, roster_player_rows, team_rows,
    write_league_csvs,
};
