#[derive(Clone, Copy, Debug)]
pub struct Glyphs {
    pub column_marker: &'static str,
    pub ruler_tick: &'static str,
    pub ruler_mid: &'static str,
    pub arrow_left: &'static str,
    pub arrow_right: &'static str,
    pub legend_bullet: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        column_marker: "^",
        ruler_tick: "|",
        ruler_mid: ".",
        arrow_left: "<",
        arrow_right: ">",
        legend_bullet: "#",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        column_marker: "▲",
        ruler_tick: "┃",
        ruler_mid: "·",
        arrow_left: "◀",
        arrow_right: "▶",
        legend_bullet: "■",
    }
}
