use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Lowercase and QMK-style names, mapped to the canonical keycode names
pub static KEYCODE_ALIAS: Lazy<HashMap<&str, &str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    macro_rules! add_alias {
        ($keycode:tt) => {
            m.insert(paste::paste!{ stringify!([<$keycode:lower>]) }, $keycode);
        };
        ($keycode:tt = $( $alias:expr),*) => {
            add_alias!($keycode);
            $(
                m.insert($alias, $keycode);
            )*
        };
    }

    add_alias!("A");
    add_alias!("B");
    add_alias!("C");
    add_alias!("D");
    add_alias!("E");
    add_alias!("F");
    add_alias!("G");
    add_alias!("H");
    add_alias!("I");
    add_alias!("J");
    add_alias!("K");
    add_alias!("L");
    add_alias!("M");
    add_alias!("N");
    add_alias!("O");
    add_alias!("P");
    add_alias!("Q");
    add_alias!("R");
    add_alias!("S");
    add_alias!("T");
    add_alias!("U");
    add_alias!("V");
    add_alias!("W");
    add_alias!("X");
    add_alias!("Y");
    add_alias!("Z");
    add_alias!("Kc1" = "1");
    add_alias!("Kc2" = "2");
    add_alias!("Kc3" = "3");
    add_alias!("Kc4" = "4");
    add_alias!("Kc5" = "5");
    add_alias!("Kc6" = "6");
    add_alias!("Kc7" = "7");
    add_alias!("Kc8" = "8");
    add_alias!("Kc9" = "9");
    add_alias!("Kc0" = "0");
    add_alias!("Enter" = "ent");
    add_alias!("Escape" = "esc");
    add_alias!("Backspace" = "bspc");
    add_alias!("Tab");
    add_alias!("Space" = "spc");
    add_alias!("Minus" = "mins");
    add_alias!("Equal" = "eql");
    add_alias!("LeftBracket" = "lbrc", "left_bracket");
    add_alias!("RightBracket" = "rbrc", "right_bracket");
    add_alias!("Backslash" = "bsls");
    add_alias!("NonusHash" = "nuhs");
    add_alias!("Semicolon" = "scln");
    add_alias!("Quote" = "quot");
    add_alias!("Grave" = "grv");
    add_alias!("Comma" = "comm");
    add_alias!("Dot");
    add_alias!("Slash" = "slsh");
    add_alias!("CapsLock" = "caps");
    add_alias!("F1");
    add_alias!("F2");
    add_alias!("F3");
    add_alias!("F4");
    add_alias!("F5");
    add_alias!("F6");
    add_alias!("F7");
    add_alias!("F8");
    add_alias!("F9");
    add_alias!("F10");
    add_alias!("F11");
    add_alias!("F12");
    add_alias!("PrintScreen" = "pscr");
    add_alias!("ScrollLock" = "scrl");
    add_alias!("Pause" = "paus");
    add_alias!("Insert" = "ins");
    add_alias!("Home");
    add_alias!("PageUp" = "pgup");
    add_alias!("Delete" = "del");
    add_alias!("End");
    add_alias!("PageDown" = "pgdn");
    add_alias!("Right" = "rght");
    add_alias!("Left");
    add_alias!("Down");
    add_alias!("Up");
    add_alias!("NumLock" = "num");
    add_alias!("KpSlash" = "psls");
    add_alias!("KpAsterisk" = "past");
    add_alias!("KpMinus" = "pmns");
    add_alias!("KpPlus" = "ppls");
    add_alias!("KpEnter" = "pent");
    add_alias!("Kp1" = "p1");
    add_alias!("Kp2" = "p2");
    add_alias!("Kp3" = "p3");
    add_alias!("Kp4" = "p4");
    add_alias!("Kp5" = "p5");
    add_alias!("Kp6" = "p6");
    add_alias!("Kp7" = "p7");
    add_alias!("Kp8" = "p8");
    add_alias!("Kp9" = "p9");
    add_alias!("Kp0" = "p0");
    add_alias!("KpDot" = "pdot");
    add_alias!("NonusBackslash" = "nubs");
    add_alias!("Application" = "app");
    add_alias!("KbPower");
    add_alias!("KpEqual" = "peql");
    add_alias!("F13");
    add_alias!("F14");
    add_alias!("F15");
    add_alias!("F16");
    add_alias!("F17");
    add_alias!("F18");
    add_alias!("F19");
    add_alias!("F20");
    add_alias!("F21");
    add_alias!("F22");
    add_alias!("F23");
    add_alias!("F24");
    add_alias!("Execute" = "exec");
    add_alias!("Help");
    add_alias!("Menu");
    add_alias!("Select" = "slct");
    add_alias!("Stop");
    add_alias!("Again" = "agin");
    add_alias!("Undo");
    add_alias!("Cut");
    add_alias!("Copy");
    add_alias!("Paste" = "pste");
    add_alias!("Find");
    add_alias!("SystemPower" = "pwr");
    add_alias!("SystemSleep" = "slep");
    add_alias!("SystemWake" = "wake");
    add_alias!("AudioMute" = "mute");
    add_alias!("AudioVolUp" = "volu");
    add_alias!("AudioVolDown" = "vold");
    add_alias!("MediaNextTrack" = "mnxt");
    add_alias!("MediaPrevTrack" = "mprv");
    add_alias!("MediaStop" = "mstp");
    add_alias!("MediaPlayPause" = "mply");
    add_alias!("MediaSelect" = "msel");
    add_alias!("MediaEject" = "ejct");
    add_alias!("Mail");
    add_alias!("Calculator" = "calc");
    add_alias!("MyComputer" = "mycm");
    add_alias!("WwwSearch" = "wsch");
    add_alias!("WwwHome" = "whom");
    add_alias!("WwwBack" = "wbak");
    add_alias!("WwwForward" = "wfwd");
    add_alias!("WwwStop" = "wstp");
    add_alias!("WwwRefresh" = "wref");
    add_alias!("WwwFavorites" = "wfav");
    add_alias!("MediaFastForward" = "mffd");
    add_alias!("MediaRewind" = "mrwd");
    add_alias!("BrightnessUp" = "briu");
    add_alias!("BrightnessDown" = "brid");
    add_alias!("ControlPanel" = "cpnl");
    add_alias!("Assistant" = "asst");
    add_alias!("MissionControl" = "mctl");
    add_alias!("Launchpad" = "lpad");
    add_alias!("MouseUp" = "ms_up");
    add_alias!("MouseDown" = "ms_down");
    add_alias!("MouseLeft" = "ms_left");
    add_alias!("MouseRight" = "ms_rght");
    add_alias!("MouseBtn1" = "btn1");
    add_alias!("MouseBtn2" = "btn2");
    add_alias!("MouseBtn3" = "btn3");
    add_alias!("MouseBtn4" = "btn4");
    add_alias!("MouseBtn5" = "btn5");
    add_alias!("MouseBtn6" = "btn6");
    add_alias!("MouseBtn7" = "btn7");
    add_alias!("MouseBtn8" = "btn8");
    add_alias!("MouseWheelUp" = "wh_u");
    add_alias!("MouseWheelDown" = "wh_d");
    add_alias!("MouseWheelLeft" = "wh_l");
    add_alias!("MouseWheelRight" = "wh_r");
    add_alias!("MouseAccel0" = "acl0");
    add_alias!("MouseAccel1" = "acl1");
    add_alias!("MouseAccel2" = "acl2");
    add_alias!("LCtrl" = "l_ctrl", "leftctrl", "left_ctrl", "lctl");
    add_alias!("LShift" = "l_shift", "leftshift", "left_shift", "lsft");
    add_alias!("LAlt" = "l_alt", "leftalt", "left_alt", "lopt");
    add_alias!("LGui" = "l_gui", "leftgui", "left_gui", "lcmd", "lwin");
    add_alias!("RCtrl" = "r_ctrl", "rightctrl", "right_ctrl", "rctl");
    add_alias!("RShift" = "r_shift", "rightshift", "right_shift", "rsft");
    add_alias!("RAlt" = "r_alt", "rightalt", "right_alt", "ropt", "algr");
    add_alias!("RGui" = "r_gui", "rightgui", "right_gui", "rcmd", "rwin");
    // Lighting
    add_alias!("RgbToggle" = "rgb_tog");
    add_alias!("RgbModeForward" = "rgb_mod");
    add_alias!("RgbModeReverse" = "rgb_rmod");
    add_alias!("RgbHueUp" = "rgb_hui");
    add_alias!("RgbHueDown" = "rgb_hud");
    add_alias!("RgbSatUp" = "rgb_sai");
    add_alias!("RgbSatDown" = "rgb_sad");
    add_alias!("RgbValUp" = "rgb_vai");
    add_alias!("RgbValDown" = "rgb_vad");
    add_alias!("RgbSpeedUp" = "rgb_spi");
    add_alias!("RgbSpeedDown" = "rgb_spd");
    // Pointer
    add_alias!("DpiForward" = "dpi_mod");
    add_alias!("DpiReverse" = "dpi_rmod");
    add_alias!("SnipingDpiForward" = "s_d_mod");
    add_alias!("SnipingDpiReverse" = "s_d_rmod");
    add_alias!("Sniping");
    add_alias!("SnipingToggle" = "snp_tog");
    add_alias!("DragScroll" = "drgscrl");
    add_alias!("DragScrollToggle" = "drg_tog");
    // Firmware
    add_alias!("Bootloader" = "boot", "qk_boot");
    add_alias!("ClearStorage" = "ee_clr");
    add_alias!("CapsWordToggle" = "cw_togg");

    m
});
