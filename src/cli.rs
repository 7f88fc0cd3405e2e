// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Sheet period (defaults to the current month)")
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32))
        .help("Calendar year (defaults to the current year)")
}

fn property_arg() -> Arg {
    Arg::new("property")
        .long("property")
        .required(true)
        .help("Property id or name")
}

fn transaction_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("amount").long("amount"))
        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
        .arg(
            Arg::new("handler")
                .long("handler")
                .help("Who handled the cash: me|sister"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("repair|tax|extra-hoa|maintenance|other"),
        )
        .arg(Arg::new("description").long("description"))
}

pub fn build_cli() -> Command {
    Command::new("rentsheet")
        .version(crate_version!())
        .about("Rent collection, shared expenses and two-party settlement")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("property")
                .about("Manage properties")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("address").long("address").default_value(""))
                        .arg(Arg::new("tenant").long("tenant").default_value(""))
                        .arg(Arg::new("rent").long("rent").required(true))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32))
                                .default_value("1"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(property_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("address").long("address"))
                        .arg(Arg::new("tenant").long("tenant"))
                        .arg(Arg::new("rent").long("rent"))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record rent and expenses")
                .subcommand(transaction_fields(
                    Command::new("add")
                        .arg(property_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(month_arg()),
                ))
                .subcommand(transaction_fields(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("property").long("property"))
                        .arg(month_arg())
                        .arg(
                            Arg::new("no-period")
                                .long("no-period")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("month")
                                .help("Drop the attributed period"),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg().help("Only entries shown on this month's sheet"))
                        .arg(Arg::new("property").long("property"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("service")
                .about("Utility and tax checklist")
                .subcommand(
                    Command::new("toggle")
                        .arg(property_arg())
                        .arg(
                            Arg::new("service")
                                .long("service")
                                .required(true)
                                .help("light|gas|water|abl|rentas|expensas-extra"),
                        )
                        .arg(month_arg()),
                )
                .subcommand(json_flags(Command::new("show").arg(month_arg()))),
        )
        .subcommand(
            Command::new("sheet")
                .about("Monthly and yearly views")
                .subcommand(json_flags(Command::new("month").arg(month_arg())))
                .subcommand(json_flags(Command::new("year").arg(year_arg())))
                .subcommand(json_flags(
                    Command::new("rent-status")
                        .arg(property_arg())
                        .arg(year_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write report, template or backup files")
                .subcommand(
                    Command::new("period")
                        .arg(month_arg())
                        .arg(Arg::new("out").long("out")),
                )
                .subcommand(Command::new("template").arg(Arg::new("out").long("out")))
                .subcommand(Command::new("backup").arg(Arg::new("out").long("out"))),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data from a backup")
                .subcommand(
                    Command::new("backup").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Shared remote document")
                .subcommand(Command::new("push"))
                .subcommand(Command::new("pull"))
                .subcommand(Command::new("watch").arg(month_arg())),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-remote").arg(Arg::new("url").required(true)))
                .subcommand(Command::new("clear-remote"))
                .subcommand(
                    Command::new("set-poll").arg(
                        Arg::new("secs")
                            .required(true)
                            .value_parser(value_parser!(u64)),
                    ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check data consistency"))
}
