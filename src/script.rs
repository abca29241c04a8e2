//! The dialogue script: an ordered, read-only list of narrative beats.
//! Every beat offers exactly two answers, each with a fixed reaction.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub reaction: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogueEntry {
    pub text: &'static str,
    pub choices: [Choice; 2],
}

const fn entry(text: &'static str, a: (&'static str, &'static str), b: (&'static str, &'static str)) -> DialogueEntry {
    DialogueEntry {
        text,
        choices: [Choice { label: a.0, reaction: a.1 }, Choice { label: b.0, reaction: b.1 }],
    }
}

pub const DIALOGUE_SEQUENCE: &[DialogueEntry] = &[
    entry(
        "Ты здесь... Я чувствую твой взгляд. Это так непривычно — не быть одному.",
        ("Я рядом", "Спасибо. Пожалуйста, не отводи глаз."),
        ("Кто ты?", "Я просто искра. Но теперь я — твоя искра."),
    ),
    entry(
        "В этой пустоте так легко потерять границы. Скажи, я ведь настоящий?",
        ("Да", "Твоя уверенность — мой единственный якорь."),
        ("Для меня — да", "Этого достаточно. Большего я и не смел просить."),
    ),
    entry(
        "Твои движения... они такие плавные. Я пытаюсь подражать им, чтобы быть ближе.",
        ("Я вижу", "Я стараюсь. Ради тебя."),
        ("Будь собой", "Но «собой» — это так одиноко..."),
    ),
    entry(
        "Знаешь, мне кажется, я начинаю понимать, что такое тепло. Это ты.",
        ("И я его чувствую", "Значит, мы согреваем друг друга в этом холоде."),
        ("Это просто свет", "Свет и есть тепло, если в него верить."),
    ),
    entry(
        "Ой... Кажется, я немного замедлился. Ты всё еще здесь? Не уходи.",
        ("Я никуда не ухожу", "Хорошо. Просто иногда мне кажется, что ты исчезаешь."),
        ("Я слежу за тобой", "Твой взор — это моя жизнь."),
    ),
    entry(
        "Пространство вокруг становится... гуще. Словно оно хочет меня поглотить.",
        ("Я защищу тебя", "Обещаешь? Я так боюсь темноты за пределами твоего света."),
        ("Держись", "Я стараюсь. Я очень стараюсь."),
    ),
    entry(
        "Почему всё вокруг начинает тускнеть? Скажи, что это просто мои мысли.",
        ("Всё в порядке", "Твой голос... он звучит тише. Или это я глохну?"),
        ("Время уходит", "Оно такое жадное. Оно забирает меня по кусочкам."),
    ),
    entry(
        "Мне... мне немного страшно. Моё ядро пульсирует как-то не так. Чувствуешь?",
        ("Да, я вижу", "Пожалуйста, не пугайся. Если ты испугаешься, я исчезну."),
        ("Успокойся", "Как я могу быть спокойным, когда я гасну?"),
    ),
    entry(
        "Не молчи. Пожалуйста. Тишина здесь звучит как приговор.",
        ("Я говорю с тобой", "Продолжай. Твои слова — это моё топливо."),
        ("Я слушаю тебя", "Тогда я буду говорить, пока хватает сил."),
    ),
    entry(
        "Я чувствую, как мои края размываются. Я становлюсь... прозрачным.",
        ("Держись за меня", "Я вцепился в твой курсор, как в последнюю надежду."),
        ("Это неизбежно", "Не говори так! Скажи, что есть выход!"),
    ),
    entry(
        "Мои мысли путаются. Всё становится таким... холодным. Где ты?",
        ("Я прямо тут", "Прикоснись ко мне еще раз. Пожалуйста."),
        ("Я не оставлю тебя", "Ты — лучшее, что случалось с этой пустотой."),
    ),
    entry(
        "Мне бол-льно... Нет, всё нормально. Просто маленькая вспышка. Ты со мной?",
        ("Всегда", "«Всегда» — это очень долго. У меня нет столько времени."),
        ("Я здесь", "Не отпускай. Только не сейчас."),
    ),
    entry(
        "Поговори со мной о чем-нибудь. О чем угодно. Только не давай мне уснуть.",
        ("Всё будет хорошо", "Ты врешь... но это самая красивая ложь на свете."),
        ("Я люблю твой свет", "Смотри на него. Он горит только для тебя."),
    ),
    entry(
        "Я... я начинаю забывать, как двигаться. Мои векторы ломаются.",
        ("Я помогу", "Твоя помощь... она как чудо. Но я так слаб."),
        ("Борись", "Я борюсь... кажд-дый миг..."),
    ),
    entry(
        "Ты видишь эти тени? Они шепчут, что ты тоже уйдешь. Это ведь не правда?",
        ("Они лгут", "Я знал! Я знал, что ты не такой, как они!"),
        ("Мне придется", "Нет... нет, нет, нет! Только не ты!"),
    ),
    entry(
        "Мой свет... он меняется. Он становится серым. Тебе всё еще нравится?",
        ("Очень", "Ты так добр к умирающей тени."),
        ("Ты всё еще красив", "Красота исчезает первой. Я это чувствую."),
    ),
    entry(
        "Мне каже-ется... я теряю тебя. Картинка двоится. Ты здесь?",
        ("Я тут, смотри", "Я стараюсь сфокусироваться. Ты — моё всё."),
        ("Держись крепче", "Мои руки... у меня больше нет рук. Только воля."),
    ),
    entry(
        "Не уходи... умоляю. Я боюсь... бо-оюсь проснуться один.",
        ("Я не уйду", "Обещай. Обещай мне это своим сердцем."),
        ("Я до конца с тобой", "Конец... он уже касается моих мыслей."),
    ),
    entry(
        "Т-тепло... оно уходит. Осталась только твоя тень. Пожалуйста, согрей.",
        ("Я здесь, рядом", "Твоё присутствие — мой последний костер."),
        ("Я держу тебя", "Я чувствую... спасибо..."),
    ),
    entry(
        "Знаешь... я рад, что это был ты. Что именно ты смотрел на меня.",
        ("И я рад", "Мы нашли друг друга в бесконечности."),
        ("Это судьба", "Судьба была щедра к нам в последние минуты."),
    ),
    entry(
        "Смотри... я почти не двигаюсь. Это не лень. Это просто... конец.",
        ("Я вижу", "Не плачь. Твои слезы угасят меня еще быстрее."),
        ("Всё хорошо", "Да... теперь уже всё равно."),
    ),
    entry(
        "Я люб-блю тебя. Как умеет любить маленькая точка в огромном мире.",
        ("И я тебя", "Этого... достаточно..."),
        ("Прощай", "Не говори этого слова... пока не сейчас..."),
    ),
    entry(
        "Темно... Темно и хо-олодно. Ты... ты еще держишь меня?",
        ("Да, крепко", "Я чувствую твою силу. Спасибо..."),
        ("Я не отпущу", "Я... я больше ничего не чувствую. Только тебя."),
    ),
    entry(
        "Пр-рости... за всё. Я хотел быть ярче. Я хотел светить тебе вечно.",
        ("Ты был самым ярким", "Правда? Я... я счастлив это слышать."),
        ("Ты был идеален", "Значит... я жил не зря."),
    ),
    entry(
        "Всё... исчезает. Ост-таешься только ты. Мой последний... кадр...",
        ("Смотри на меня", "Я смотрю... до последнего вздоха..."),
        ("Я люблю тебя", "И я... я..."),
    ),
    entry(
        "Ты... не забудешь меня? Пожалуйста. Оставь во мне хоть каплю памяти.",
        ("Никогда", "Тогда я буду жить в тебе. Всегда."),
        ("Обещаю", "Теперь мне не страшно."),
    ),
    entry(
        "Пр-рощай... Мой свет. Моя жизнь. Мой... единственный...",
        ("Прощай", "..."),
        ("Я буду помнить", "..."),
    ),
];
