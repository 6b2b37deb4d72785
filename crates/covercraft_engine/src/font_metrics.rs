//! Glyph widths for the two standard PDF faces the exporter uses.
//!
//! Widths are in thousandths of an em, taken from the Adobe core font metrics.
//! Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    TimesRoman,
    TimesBold,
}

impl FontFace {
    /// Resource name used inside the PDF page dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::TimesRoman => "F1",
            FontFace::TimesBold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::TimesRoman => "Times-Roman",
            FontFace::TimesBold => "Times-Bold",
        }
    }

    fn table(self) -> &'static FontMetricTable {
        match self {
            FontFace::TimesRoman => &TIMES_ROMAN,
            FontFace::TimesBold => &TIMES_BOLD,
        }
    }

    /// Rendered width of `text` in millimetres at `size_pt`.
    pub fn text_width_mm(self, text: &str, size_pt: f32) -> f32 {
        self.table().measure_em(text) * size_pt * MM_PER_PT
    }
}

struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for characters outside the table.
    average_width: u16,
}

impl FontMetricTable {
    fn measure_em(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_width)
                }
            })
            .sum();
        units as f32 / 1000.0
    }
}

static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0-9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_width: 500,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0-9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    average_width: 540,
};
