// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
   _   ___ _       ___              _
  /_\ | _ \ |     / __|_ _ __ _ __| |___ _ _
 / _ \|  _/ |__  | (_ | '_/ _` / _` / -_) '_|
/_/ \_\_| |____|  \___|_| \__,_\__,_\___|_|

    APL Submission Grading Service
"#;
    println!("{}", banner);
}
