use super::model::{
    AncestralSeat, Family, FamilyEvent, GenealogyData, Gender, Member, Surname, Tanghao,
};

const CLAN: &str = "f_huang_jiangxia";
const PATRIARCH: &str = "m_huang_jiancheng";

fn surname(
    id: &str,
    name: &str,
    origin: &str,
    seat: (&str, &str, &str),
    hall: Tanghao,
) -> Surname {
    Surname {
        id: id.into(),
        name: name.into(),
        origin: origin.into(),
        seats: vec![AncestralSeat {
            name: seat.0.into(),
            region: seat.1.into(),
            description: seat.2.into(),
        }],
        tanghao: vec![hall],
    }
}

fn hall(id: &str, name: &str, region: &str, year: &str, couplet: &str) -> Tanghao {
    Tanghao {
        id: id.into(),
        name: name.into(),
        region: region.into(),
        year: year.into(),
        origin: "源自郡望".into(),
        couplet: couplet.into(),
    }
}

fn external_family(
    id: &str,
    name: &str,
    surname_id: &str,
    tanghao_id: &str,
    founder: &str,
    origin: &str,
    note: &str,
) -> Family {
    Family {
        id: id.into(),
        name: name.into(),
        surname_id: surname_id.into(),
        tanghao_id: tanghao_id.into(),
        founder: founder.into(),
        origin: origin.into(),
        description: note.into(),
        creator_id: "sys_admin".into(),
        ..Family::default()
    }
}

fn spouse(id: &str, family_id: &str, name: &str, birth: &str, bio: &str, photo: u32) -> Member {
    Member {
        gender: Gender::Female,
        generation: 21,
        spouse_ids: vec![PATRIARCH.into()],
        birth_date: birth.into(),
        bio: bio.into(),
        photo: Some(format!("https://picsum.photos/id/{photo}/100/100")),
        ..Member::new(id, family_id, name)
    }
}

fn child(
    id: &str,
    name: &str,
    gender: Gender,
    mother: &str,
    birth: &str,
    bio: &str,
    photo: u32,
) -> Member {
    Member {
        gender,
        generation: 22,
        father_id: Some(PATRIARCH.into()),
        mother_id: Some(mother.into()),
        birth_date: birth.into(),
        bio: bio.into(),
        photo: Some(format!("https://picsum.photos/id/{photo}/100/100")),
        ..Member::new(id, CLAN, name)
    }
}

/// Dataset written on first run: the Jiangxia Huang clan with a patriarch,
/// his three wives from other clans and three children by each.
pub fn initial_data() -> GenealogyData {
    let surnames = vec![
        surname(
            "s_huang",
            "黄",
            "出自嬴姓，以国名为氏。",
            ("江夏郡", "湖北云梦", "汉高帝置。"),
            hall("t_jiangxia", "江夏堂", "湖北", "汉代", "江夏世泽，颖川家声"),
        ),
        surname(
            "s_jiang",
            "姜",
            "源于炎帝神农氏，兴于封神姜子牙。",
            ("天水郡", "甘肃", "汉代置。"),
            hall("t_tianshui", "天水堂", "甘肃", "汉代", "天水世泽，尚父家声"),
        ),
        surname(
            "s_zhang_ch",
            "章",
            "出自姜姓，以封国名为氏。",
            ("河间郡", "河北", "汉代置。"),
            hall("t_hejian", "河间堂", "河北", "汉代", "河间世泽，大雅家声"),
        ),
        surname(
            "s_xiang",
            "向",
            "出自祁姓，以国名为氏。",
            ("河南郡", "河南", "秦代置。"),
            hall("t_henan", "河南堂", "河南", "秦代", "河南世泽，向国家声"),
        ),
    ];

    let families = vec![
        Family {
            id: CLAN.into(),
            name: "江夏黄氏".into(),
            surname_id: "s_huang".into(),
            tanghao_id: "t_jiangxia".into(),
            founder: "黄香".into(),
            origin: "湖北江夏".into(),
            description: "江夏黄氏，天下黄姓第一大支，以“天下无双”黄香为始祖。".into(),
            creator_id: "sys_admin".into(),
            zibei: Some("金水木土火，世德永流传。文章华国业，忠孝传家宝。".into()),
            motto: Some("孝悌忠信，礼义廉耻。读书明理，勤俭持家。".into()),
            migration: Some(
                "始祖香公居江夏。唐末，部分族人随王潮、王审知入闽。宋元时期，分支迁往广东、江西等地。"
                    .into(),
            ),
            events: vec![
                FamilyEvent {
                    year: "汉代".into(),
                    title: "黄香封侯".into(),
                    description: "始祖黄香任尚书令，以孝廉闻名。".into(),
                },
                FamilyEvent {
                    year: "唐代".into(),
                    title: "入闽始祖".into(),
                    description: "黄氏先祖随军入福建，定居莆田。".into(),
                },
                FamilyEvent {
                    year: "1930".into(),
                    title: "修谱".into(),
                    description: "在宗祠进行第十二次大修谱。".into(),
                },
            ],
        },
        external_family(
            "f_jiang_tianshui",
            "天水姜氏",
            "s_jiang",
            "t_tianshui",
            "姜维",
            "甘肃天水",
            "外家族：姜珮瑶所属家族。",
        ),
        external_family(
            "f_zhang_hejian",
            "河间章氏",
            "s_zhang_ch",
            "t_hejian",
            "章邯",
            "河北河间",
            "外家族：章若楠所属家族。",
        ),
        external_family("f_xiang_henan", "河南向氏", "s_xiang", "t_henan", "向秀", "河南", "外家族：向涵之所属家族。"),
    ];

    let members = vec![
        Member {
            generation: 20,
            birth_date: "1930-01-01".into(),
            bio: "家族长辈".into(),
            photo: Some("https://picsum.photos/id/1005/100/100".into()),
            ..Member::new("m_huang_zu", CLAN, "黄公")
        },
        Member {
            generation: 21,
            father_id: Some("m_huang_zu".into()),
            spouse_ids: vec![
                "m_jiang_peiyao".into(),
                "m_zhang_ruonan".into(),
                "m_xiang_hanzhi".into(),
            ],
            birth_date: "1960-05-20".into(),
            bio: "家族族长，事业有成，多子多福。".into(),
            photo: Some("https://picsum.photos/id/1012/100/100".into()),
            ..Member::new(PATRIARCH, CLAN, "黄建成")
        },
        spouse("m_jiang_peiyao", "f_jiang_tianshui", "姜珮瑶", "1962-03-15", "黄建成元配，温婉贤淑。", 1011),
        spouse("m_zhang_ruonan", "f_zhang_hejian", "章若楠", "1965-07-22", "黄建成二房，才貌双全。", 1027),
        spouse("m_xiang_hanzhi", "f_xiang_henan", "向涵之", "1968-11-11", "黄建成三房，机智聪慧。", 1025),
        child("m_huang_a", "黄伯文", Gender::Male, "m_jiang_peiyao", "1982-01-01", "姜氏所生长子。", 1050),
        child("m_huang_b", "黄仲武", Gender::Male, "m_jiang_peiyao", "1984-02-02", "姜氏所生次子。", 1051),
        child("m_huang_c", "黄季兰", Gender::Female, "m_jiang_peiyao", "1986-03-03", "姜氏所生长女。", 1052),
        child("m_huang_d", "黄叔贤", Gender::Male, "m_zhang_ruonan", "1988-04-04", "章氏所生长子。", 1053),
        child("m_huang_e", "黄婉儿", Gender::Female, "m_zhang_ruonan", "1990-05-05", "章氏所生长女。", 1054),
        child("m_huang_f", "黄季德", Gender::Male, "m_zhang_ruonan", "1992-06-06", "章氏所生次子。", 1055),
        child("m_huang_g", "黄幼安", Gender::Male, "m_xiang_hanzhi", "1994-07-07", "向氏所生长子。", 1056),
        child("m_huang_h", "黄幼薇", Gender::Female, "m_xiang_hanzhi", "1996-08-08", "向氏所生长女。", 1057),
        child("m_huang_i", "黄幼敏", Gender::Female, "m_xiang_hanzhi", "1998-09-09", "向氏所生幼女。", 1058),
    ];

    GenealogyData {
        surnames,
        families,
        members,
    }
}
