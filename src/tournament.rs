use chrono::NaiveDate;

use crate::model::{
    Bracket, BracketMatch, BracketRound, BracketTeam, DateRange, MatchFormat, Prize, RuleSection,
    Tournament, TournamentFormat,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn team(name: &str, seed: Option<u8>, score: Option<u8>, won: bool) -> BracketTeam {
    BracketTeam {
        name: name.to_owned(),
        seed,
        score,
        won,
    }
}

fn played(number: u8, a: (&str, u8, u8), b: (&str, u8, u8)) -> BracketMatch {
    BracketMatch {
        number,
        completed: true,
        teams: [
            team(a.0, Some(a.1), Some(a.2), a.2 > b.2),
            team(b.0, Some(b.1), Some(b.2), b.2 > a.2),
        ],
    }
}

fn pending(number: u8, a: (&str, Option<u8>), b: (&str, Option<u8>)) -> BracketMatch {
    BracketMatch {
        number,
        completed: false,
        teams: [team(a.0, a.1, None, false), team(b.0, b.1, None, false)],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Tournament {
    /// The CS2 cup of May 2025, as announced on the tournament page.
    pub fn cs2_2025() -> Self {
        let main_event = DateRange {
            start: date(2025, 5, 25),
            end: date(2025, 5, 28),
        };

        Self {
            title: "CS2 Турнир 2025".to_owned(),
            tagline: "Соревнования лучших команд".to_owned(),
            game: "Counter-Strike 2".to_owned(),
            main_event,
            qualification: DateRange {
                start: date(2025, 5, 10),
                end: date(2025, 5, 15),
            },
            registration_deadline: date(2025, 5, 1),
            prize_pool: 500_000,
            team_slots: 32,
            format: TournamentFormat {
                playoff: "Single elimination".to_owned(),
                playoff_matches: MatchFormat::Bo3,
                grand_final: MatchFormat::Bo5,
            },
            map_pool: strings(&[
                "Dust II", "Mirage", "Inferno", "Nuke", "Overpass", "Ancient", "Anubis",
            ]),
            rules: vec![
                RuleSection {
                    title: "Общие положения".to_owned(),
                    items: strings(&[
                        "Возраст участников: от 16 лет",
                        "Каждый участник должен иметь лицензионную копию CS2",
                        "Запрещено использование любого стороннего ПО",
                        "Возможность онлайн-трансляции всех матчей",
                    ]),
                },
                RuleSection {
                    title: "Технические требования".to_owned(),
                    items: strings(&[
                        "Стабильное интернет-соединение (пинг не выше 80 мс)",
                        "Наличие микрофона и Discord",
                        "Запрет на использование скриптов и макросов",
                        "Обязательная проверка ПО перед началом матчей",
                    ]),
                },
                RuleSection {
                    title: "Дисциплинарные меры".to_owned(),
                    items: strings(&[
                        "Опоздание более чем на 15 минут – техническое поражение",
                        "Нарушение правил – дисквалификация команды",
                        "Неспортивное поведение – предупреждение/дисквалификация",
                    ]),
                },
            ],
            prizes: vec![
                Prize {
                    first_place: 1,
                    last_place: 1,
                    amount: 250_000,
                },
                Prize {
                    first_place: 2,
                    last_place: 2,
                    amount: 125_000,
                },
                Prize {
                    first_place: 3,
                    last_place: 4,
                    amount: 50_000,
                },
                Prize {
                    first_place: 5,
                    last_place: 8,
                    amount: 25_000,
                },
            ],
            bracket: Bracket {
                team_count: 10,
                elimination: "Single Elimination".to_owned(),
                dates: main_event,
                rounds: vec![
                    BracketRound {
                        number: 1,
                        title: "Четвертьфинал".to_owned(),
                        matches: vec![
                            played(1, ("Astralis", 1, 16), ("Liquid", 10, 10)),
                            played(2, ("NaVi", 4, 16), ("Vitality", 5, 14)),
                            played(3, ("FaZe", 2, 16), ("ENCE", 7, 13)),
                            played(4, ("G2", 6, 9), ("Cloud9", 3, 16)),
                        ],
                    },
                    BracketRound {
                        number: 2,
                        title: "Полуфинал".to_owned(),
                        matches: vec![
                            played(5, ("Astralis", 1, 8), ("NaVi", 4, 16)),
                            pending(6, ("FaZe", Some(2)), ("Cloud9", Some(3))),
                        ],
                    },
                    BracketRound {
                        number: 3,
                        title: "Финал".to_owned(),
                        matches: vec![pending(7, ("NaVi", Some(4)), ("TBD", None))],
                    },
                ],
            },
        }
    }

    /// Prize money for a final placement, if the placement is paid.
    pub fn prize_for(&self, place: u8) -> Option<u32> {
        self.prizes
            .iter()
            .find(|prize| (prize.first_place..=prize.last_place).contains(&place))
            .map(|prize| prize.amount)
    }
}
